//! The full decode of one `data.bin`.

use lbpk_archive::{split, SegmentKind, Segments};
use lbpk_cm2::Cm2Metadata;
use lbpk_common::Result;

/// Segments plus metadata of one track.
///
/// Produced all at once by [`extract`]: if anything fails there is no partial
/// result to write.
#[derive(Debug, Clone)]
pub struct TrackExtraction<'a> {
    /// The four segments, borrowed from the archive buffer.
    pub segments: Segments<'a>,
    /// Metadata decoded from the CM2 segment.
    pub metadata: Cm2Metadata,
}

impl<'a> TrackExtraction<'a> {
    /// `<SANITIZED NAME>_<UNIQUE ID>`.
    pub fn base_filename(&self) -> String {
        self.metadata.base_filename()
    }

    /// The four output files as `(file name, bytes)` in archive order.
    pub fn output_files(&self) -> Vec<(String, &'a [u8])> {
        let base = self.base_filename();
        SegmentKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    format!("{}.{}", base, kind.extension()),
                    self.segments.get(kind).data,
                )
            })
            .collect()
    }
}

/// Split an archive and decode its CM2 metadata.
pub fn extract(data: &[u8]) -> Result<TrackExtraction<'_>> {
    let segments = split(data)?;
    let metadata = Cm2Metadata::parse(segments.composite_metadata.data)?;
    Ok(TrackExtraction { segments, metadata })
}
