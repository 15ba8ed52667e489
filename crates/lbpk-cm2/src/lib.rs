//! CM2 (composite metadata) parser for LittleBigPlanet Karting tracks.
//!
//! The CM2 segment is the third of the four files packed into a server
//! `data.bin`. Only a handful of its fields are understood; this crate reads
//! those and nothing else.
//!
//! # Layout
//!
//! - 16 bytes: header, with the payload length stored twice as big-endian
//!   u16 at `[6:8)` and `[10:12)`
//! - `[44..)`: display name, NUL-terminated
//! - `[112:116)`: unique id bytes
//! - somewhere after a second copy of the display name: the description
//!
//! The description has no known fixed position. It is found by locating the
//! second occurrence of the display name and reading the NUL-terminated run
//! one byte past its end.
//!
//! # Example
//!
//! ```no_run
//! use lbpk_cm2::Cm2Metadata;
//!
//! let segment = std::fs::read("TRACK_1A2B00FF.CM2")?;
//! let meta = Cm2Metadata::parse(&segment)?;
//! println!("{} ({}): {}", meta.display_name, meta.unique_id, meta.description);
//! println!("base file name: {}", meta.base_filename());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod header;
mod metadata;
mod sanitize;

pub use header::Cm2Header;
pub use metadata::{
    description_bytes, display_name_bytes, unique_id, Cm2Metadata, DISPLAY_NAME_OFFSET,
    UNIQUE_ID_OFFSET,
};
pub use sanitize::sanitize_track_name;

pub use lbpk_common::{Error, Result, UniqueId};
