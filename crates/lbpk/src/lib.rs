//! LBPK - LittleBigPlanet Karting community track conversion library.
//!
//! Archived game servers store each community track as a single `data.bin`.
//! The game itself wants four separate files named after the track. This
//! crate ties the decoding crates together and provides the batch driver that
//! writes those files.
//!
//! # Crates
//!
//! - [`lbpk_common`] - Bounds-checked reading, error kinds, unique ids
//! - [`lbpk_cm2`] - CM2 metadata parsing and track name sanitizing
//! - [`lbpk_archive`] - `data.bin` splitting
//!
//! # Example
//!
//! ```no_run
//! use lbpk::prelude::*;
//!
//! let converter = Converter::new("converted");
//! for source in discover_tracks("server_files")? {
//!     match converter.convert(&source) {
//!         Ok(track) => println!("{} -> {}", source.id, track.base_filename),
//!         Err(e) => eprintln!("{}: {}", source.id, e),
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod track;

// Re-export all sub-crates
pub use lbpk_archive as archive;
pub use lbpk_cm2 as cm2;
pub use lbpk_common as common;

pub use convert::{discover_tracks, ConvertedTrack, Converter, TrackSource, DATA_FILE_NAME};
pub use error::{Error, Result};
pub use track::{extract, TrackExtraction};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        discover_tracks, extract, ConvertedTrack, Converter, TrackExtraction, TrackSource,
    };
    pub use lbpk_archive::{split, OwnedSegments, Segment, SegmentKind, Segments};
    pub use lbpk_cm2::{sanitize_track_name, Cm2Metadata};
    pub use lbpk_common::{inspect, search, ByteCursor, UniqueId};
}
