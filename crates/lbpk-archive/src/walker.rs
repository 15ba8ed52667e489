//! Archive splitting.

use lbpk_cm2::Cm2Header;
use lbpk_common::{ByteCursor, Error, Result};

use crate::{CthHeader, Segment, SegmentKind, Segments};

/// Offset of the TRK total-length field, relative to the TRK segment start.
pub const TRK_SIZE_OFFSET: usize = 20;

/// Walks an archive front to back, reading each segment's length from the
/// header that precedes or starts it.
///
/// Every length is checked against the buffer before the cursor moves. A
/// length that does not fit is an error for the whole archive; nothing is
/// clamped or guessed.
#[derive(Debug, Clone)]
pub struct SegmentWalker<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> SegmentWalker<'a> {
    /// Create a walker over one archive buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
        }
    }

    /// Split the archive into its four segments.
    pub fn walk(mut self) -> Result<Segments<'a>> {
        let header: CthHeader = self
            .cursor
            .read_struct()
            .map_err(|e| e.within("CTH header"))?;

        let trk_size = self.track_size()?;
        let track = self.take(SegmentKind::Track, trk_size)?;

        let cm2_size = self.cm2_size()?;
        let composite_metadata = self.take(SegmentKind::CompositeMetadata, cm2_size)?;

        let navigation = self.take(SegmentKind::Navigation, header.nav_size())?;

        let heads_up_display = Segment {
            kind: SegmentKind::HeadsUpDisplay,
            offset: self.cursor.position(),
            data: self.cursor.read_rest(),
        };

        debug_assert_eq!(
            CthHeader::SIZE
                + track.len()
                + composite_metadata.len()
                + navigation.len()
                + heads_up_display.len(),
            self.cursor.len()
        );

        Ok(Segments {
            header,
            track,
            composite_metadata,
            navigation,
            heads_up_display,
        })
    }

    /// Read the TRK total length from inside the TRK header.
    fn track_size(&self) -> Result<usize> {
        let start = self.cursor.position();
        let size = self
            .cursor
            .u32_be_at(start + TRK_SIZE_OFFSET)
            .map_err(|e| e.within("TRK header"))? as usize;

        // The length counts the header it is stored in.
        if size < TRK_SIZE_OFFSET + 4 {
            return Err(Error::LayoutInconsistent {
                what: "TRK header",
                reason: format!(
                    "declared length {size} ends before its own length field at {start}+{TRK_SIZE_OFFSET}"
                ),
            });
        }

        Ok(size)
    }

    /// Validate the CM2 header at the cursor and return header + payload length.
    fn cm2_size(&self) -> Result<usize> {
        let bytes = self
            .cursor
            .peek_bytes(Cm2Header::SIZE)
            .map_err(|e| e.within("CM2 header"))?;
        Cm2Header::read(bytes)?.segment_size()
    }

    fn take(&mut self, kind: SegmentKind, len: usize) -> Result<Segment<'a>> {
        let offset = self.cursor.position();
        let data = self.cursor.read_bytes(len).map_err(|e| match e {
            Error::BufferTruncated { .. } => e.within(kind_name(kind)),
            Error::LayoutInconsistent { reason, .. } => Error::LayoutInconsistent {
                what: kind_name(kind),
                reason,
            },
            other => other,
        })?;

        Ok(Segment { kind, offset, data })
    }
}

fn kind_name(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Track => "TRK segment",
        SegmentKind::CompositeMetadata => "CM2 segment",
        SegmentKind::Navigation => "NAV segment",
        SegmentKind::HeadsUpDisplay => "HUD segment",
    }
}

/// Split an archive buffer into its four segments.
pub fn split(data: &[u8]) -> Result<Segments<'_>> {
    SegmentWalker::new(data).walk()
}
