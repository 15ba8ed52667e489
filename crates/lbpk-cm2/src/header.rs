//! CM2 header structure.

use lbpk_common::{ByteCursor, Error, Result};
use zerocopy::byteorder::big_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// CM2 segment header.
///
/// The payload length (excluding these 16 bytes) appears twice. Nothing else
/// in the header has a known meaning.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Cm2Header {
    /// Unknown.
    pub unknown0: [u8; 6],
    /// Payload length, first copy.
    pub size_a: U16,
    /// Unknown.
    pub unknown1: [u8; 2],
    /// Payload length, second copy.
    pub size_b: U16,
    /// Unknown.
    pub unknown2: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<Cm2Header>() == Cm2Header::SIZE);

impl Cm2Header {
    /// Size of the header in bytes.
    pub const SIZE: usize = 16;

    /// Read the header from the start of a CM2 segment.
    pub fn read(data: &[u8]) -> Result<Self> {
        ByteCursor::new(data)
            .read_struct::<Self>()
            .map_err(|e| e.within("CM2 header"))
    }

    /// The payload length, if both copies agree.
    pub fn payload_size(&self) -> Result<usize> {
        let (first, second) = (self.size_a.get(), self.size_b.get());
        if first != second {
            return Err(Error::HeaderSizeMismatch { first, second });
        }
        Ok(first as usize)
    }

    /// Header plus payload length.
    pub fn segment_size(&self) -> Result<usize> {
        Ok(self.payload_size()? + Self::SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(size_a: u16, size_b: u16) -> [u8; 16] {
        let mut h = [0xEEu8; 16];
        h[6..8].copy_from_slice(&size_a.to_be_bytes());
        h[10..12].copy_from_slice(&size_b.to_be_bytes());
        h
    }

    #[test]
    fn test_matching_sizes() {
        let h = Cm2Header::read(&header(0x0123, 0x0123)).unwrap();
        assert_eq!(h.payload_size().unwrap(), 0x0123);
        assert_eq!(h.segment_size().unwrap(), 0x0123 + 16);
    }

    #[test]
    fn test_size_mismatch() {
        let h = Cm2Header::read(&header(100, 101)).unwrap();
        assert_eq!(
            h.payload_size(),
            Err(Error::HeaderSizeMismatch {
                first: 100,
                second: 101
            })
        );
    }

    #[test]
    fn test_short_header() {
        assert!(matches!(
            Cm2Header::read(&[0u8; 15]),
            Err(Error::BufferTruncated {
                what: "CM2 header",
                needed: 16,
                ..
            })
        ));
    }
}
