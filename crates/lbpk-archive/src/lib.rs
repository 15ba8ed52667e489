//! Splitter for LittleBigPlanet Karting server track archives.
//!
//! The archived community servers store each track as one `data.bin`: a
//! 20-byte CTH header followed by four files laid end to end.
//!
//! # File Format
//!
//! All multi-byte fields are big-endian.
//!
//! - 20 bytes: CTH header, NAV length at `[12:16)`
//! - TRK: total length (own header included) at local `[20:24)`
//! - CM2: 16-byte header + payload, payload length at local `[6:8)` and `[10:12)`
//! - NAV: length taken from the CTH header
//! - HUD: everything that is left, possibly nothing
//!
//! # Example
//!
//! ```no_run
//! use lbpk_archive::split;
//!
//! let data = std::fs::read("server/1234/data.bin")?;
//! let segments = split(&data)?;
//!
//! for segment in segments.iter() {
//!     println!("{}: {} bytes at {:#x}", segment.kind, segment.len(), segment.offset);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod header;
mod segment;
mod walker;

pub use header::CthHeader;
pub use segment::{OwnedSegments, Segment, SegmentKind, Segments};
pub use walker::{split, SegmentWalker, TRK_SIZE_OFFSET};

pub use lbpk_common::{Error, Result};
