//! Error types for track conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting one track folder.
#[derive(Debug, Error)]
pub enum Error {
    /// The archive could not be decoded.
    #[error("{0}")]
    Format(#[from] lbpk_common::Error),

    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The track folder has no `data.bin`.
    #[error("data.bin not found in {}", dir.display())]
    MissingData { dir: PathBuf },

    /// The display name has no characters left after sanitizing.
    #[error("track {track}: display name {name:?} is empty after sanitizing")]
    EmptyTrackName { track: String, name: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the track was skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
