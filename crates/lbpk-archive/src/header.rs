//! CTH header structure.

use zerocopy::byteorder::big_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// The 20-byte prefix of every `data.bin`.
///
/// Only the NAV length is understood. The rest is carried through untouched.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct CthHeader {
    /// Unknown. The first 4 bytes are identical across all archived tracks.
    pub unknown0: [u8; 12],
    /// Length of the NAV segment.
    pub nav_size: U32,
    /// Unknown.
    pub unknown1: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<CthHeader>() == CthHeader::SIZE);

impl CthHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 20;

    /// Length of the NAV segment in bytes.
    #[inline]
    pub fn nav_size(&self) -> usize {
        self.nav_size.get() as usize
    }
}
