//! Segment views into a split archive.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::CthHeader;

/// The four files packed into a `data.bin`, in archive order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// Track geometry (`.TRK`).
    Track,
    /// Composite metadata (`.CM2`).
    CompositeMetadata,
    /// Navigation data (`.NAV`).
    Navigation,
    /// Heads-up display data (`.HUD`).
    HeadsUpDisplay,
}

impl SegmentKind {
    /// All kinds in the order they appear in an archive.
    pub const ALL: [Self; 4] = [
        Self::Track,
        Self::CompositeMetadata,
        Self::Navigation,
        Self::HeadsUpDisplay,
    ];

    /// The file extension the game expects, uppercase and without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Track => "TRK",
            Self::CompositeMetadata => "CM2",
            Self::Navigation => "NAV",
            Self::HeadsUpDisplay => "HUD",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown segment {s:?}, expected one of trk, cm2, nav, hud"))
    }
}

/// One segment, borrowed from the archive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Which file this is.
    pub kind: SegmentKind,
    /// Absolute offset of the first byte in the archive.
    pub offset: usize,
    /// The segment bytes.
    pub data: &'a [u8],
}

impl Segment<'_> {
    /// Segment length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-length segment (only the HUD may be one).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Absolute offset one past the last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.data.len()
    }

    /// Absolute byte range within the archive.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// The result of splitting one archive.
///
/// Segments are contiguous and appear in [`SegmentKind::ALL`] order; their
/// lengths add up to the archive length minus the CTH header.
#[derive(Debug, Clone, Copy)]
pub struct Segments<'a> {
    /// The CTH header the NAV length came from.
    pub header: CthHeader,
    /// TRK: starts right after the CTH header and is as long as the
    /// big-endian u32 at its own offset 20 says.
    pub track: Segment<'a>,
    /// CM2: 16-byte header plus the payload size stored (twice) in it.
    pub composite_metadata: Segment<'a>,
    /// NAV: length taken from the CTH header.
    pub navigation: Segment<'a>,
    /// HUD: everything left after NAV. May be empty.
    pub heads_up_display: Segment<'a>,
}

impl<'a> Segments<'a> {
    /// Look up a segment by kind.
    pub fn get(&self, kind: SegmentKind) -> &Segment<'a> {
        match kind {
            SegmentKind::Track => &self.track,
            SegmentKind::CompositeMetadata => &self.composite_metadata,
            SegmentKind::Navigation => &self.navigation,
            SegmentKind::HeadsUpDisplay => &self.heads_up_display,
        }
    }

    /// Iterate over the segments in archive order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment<'a>> {
        SegmentKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    /// Copy the segment bytes out so they can outlive the archive buffer.
    pub fn to_owned_segments(&self) -> OwnedSegments {
        OwnedSegments {
            track: self.track.data.to_vec(),
            composite_metadata: self.composite_metadata.data.to_vec(),
            navigation: self.navigation.data.to_vec(),
            heads_up_display: self.heads_up_display.data.to_vec(),
        }
    }
}

/// Owned copies of the four segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedSegments {
    /// TRK bytes.
    pub track: Vec<u8>,
    /// CM2 bytes, header included.
    pub composite_metadata: Vec<u8>,
    /// NAV bytes.
    pub navigation: Vec<u8>,
    /// HUD bytes.
    pub heads_up_display: Vec<u8>,
}

impl OwnedSegments {
    /// Borrow the bytes of one segment.
    pub fn get(&self, kind: SegmentKind) -> &[u8] {
        match kind {
            SegmentKind::Track => &self.track,
            SegmentKind::CompositeMetadata => &self.composite_metadata,
            SegmentKind::Navigation => &self.navigation,
            SegmentKind::HeadsUpDisplay => &self.heads_up_display,
        }
    }

    /// Total bytes across all four segments.
    pub fn total_len(&self) -> usize {
        SegmentKind::ALL.iter().map(|&kind| self.get(kind).len()).sum()
    }
}
