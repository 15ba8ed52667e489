//! Error kinds for decoding a track archive.

use thiserror::Error;

/// Every way a single track archive can fail to decode.
///
/// The set is closed so callers can pick a recovery policy per kind. None of
/// these abort a batch on their own; the driver decides whether to skip the
/// track or stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A computed range ends past the available bytes.
    #[error("{what} truncated: needed {needed} bytes at offset {offset} but only {available} available")]
    BufferTruncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Computed boundaries overflow, go backward, or contradict themselves.
    #[error("inconsistent layout in {what}: {reason}")]
    LayoutInconsistent { what: &'static str, reason: String },

    /// The two redundant CM2 payload sizes disagree.
    #[error("CM2 header size mismatch: {first} at [6:8) vs {second} at [10:12)")]
    HeaderSizeMismatch { first: u16, second: u16 },

    /// A fixed-offset field lies outside its segment.
    #[error("{field} at [{start}:{end}) is out of bounds for a {segment_len}-byte segment")]
    FieldOutOfBounds {
        field: &'static str,
        start: usize,
        end: usize,
        segment_len: usize,
    },

    /// The display name does not occur anywhere in the CM2 segment.
    #[error("track name anchor not found in CM2 data")]
    AnchorNotFound,

    /// The display name occurs only once, so the description cannot be located.
    #[error("second occurrence of track name not found after offset {first}")]
    SecondAnchorNotFound { first: usize },
}

impl Error {
    /// Relabel a truncation error with the structure that was being read.
    ///
    /// Other kinds pass through untouched.
    pub fn within(self, what: &'static str) -> Self {
        match self {
            Self::BufferTruncated {
                offset,
                needed,
                available,
                ..
            } => Self::BufferTruncated {
                what,
                offset,
                needed,
                available,
            },
            other => other,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_relabels_truncation() {
        let err = Error::BufferTruncated {
            what: "buffer",
            offset: 4,
            needed: 16,
            available: 2,
        }
        .within("CM2 header");

        assert_eq!(
            err.to_string(),
            "CM2 header truncated: needed 16 bytes at offset 4 but only 2 available"
        );
    }

    #[test]
    fn test_within_keeps_other_kinds() {
        let err = Error::HeaderSizeMismatch { first: 1, second: 2 }.within("ignored");
        assert_eq!(err, Error::HeaderSizeMismatch { first: 1, second: 2 });
    }
}
