//! Common utilities for LBPK track conversion.
//!
//! This crate provides foundational types used across all LBPK crates:
//!
//! - [`ByteCursor`] - Bounds-checked, zero-copy reading from byte slices
//! - [`UniqueId`] - The 4-byte track identifier used in output file names
//! - [`Error`] - The closed set of ways a track archive can fail to decode
//! - [`search`] - memchr-backed NUL and byte-run searching
//! - [`inspect`] - Hex and printable renderings, byte-wise comparison

mod cursor;
mod error;
mod unique_id;

pub mod inspect;
pub mod search;

pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use unique_id::{ParseUniqueIdError, UniqueId};
