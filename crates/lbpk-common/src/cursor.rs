//! Bounds-checked cursor over an immutable byte buffer.
//!
//! This module provides [`ByteCursor`], which hands out sub-slices of the
//! buffer it was created over. Every read is checked against the buffer end
//! and every offset computation against overflow; nothing is clamped.

use byteorder::{BigEndian, ByteOrder};
use zerocopy::FromBytes;

use crate::{search, Error, Result};

/// A cursor that reads from a byte slice without copying.
///
/// All multi-byte integers in the LBPK server formats are big-endian, so the
/// integer readers here are big-endian only.
///
/// # Example
///
/// ```
/// use lbpk_common::ByteCursor;
///
/// let data = [0xAA, 0xBB, 0x00, 0x00, 0x01, 0x00];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_bytes(2).unwrap(), &[0xAA, 0xBB]);
/// assert_eq!(cursor.u32_be_at(2).unwrap(), 256);
/// assert_eq!(cursor.read_rest().len(), 4);
/// assert!(cursor.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a new cursor at the start of a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Borrow `len` bytes at an absolute offset, independent of the position.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset.checked_add(len).ok_or_else(|| Error::LayoutInconsistent {
            what: "buffer",
            reason: format!("range {offset}+{len} overflows"),
        })?;

        if end > self.data.len() {
            return Err(Error::BufferTruncated {
                what: "buffer",
                offset,
                needed: len,
                available: self.data.len().saturating_sub(offset),
            });
        }

        Ok(&self.data[offset..end])
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.slice_at(self.position, count)
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Take everything from the position to the end of the buffer.
    ///
    /// The result may be empty.
    #[inline]
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining_bytes();
        self.position = self.data.len();
        rest
    }

    /// Read a big-endian u32 at an absolute offset without moving.
    #[inline]
    pub fn u32_be_at(&self, offset: usize) -> Result<u32> {
        self.slice_at(offset, 4).map(BigEndian::read_u32)
    }

    /// Read the bytes of a NUL-terminated run at an absolute offset.
    ///
    /// The run ends at the first zero byte (excluded) or the buffer end. An
    /// offset at or past the end yields an empty run; this never fails.
    pub fn cstr_bytes_at(&self, offset: usize) -> &'a [u8] {
        if offset >= self.data.len() {
            return &[];
        }
        let tail = &self.data[offset..];
        let end = search::find_null(tail).unwrap_or(tail.len());
        &tail[..end]
    }

    /// Read a struct using zerocopy and advance past it.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let offset = self.position;
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::BufferTruncated {
            what: "buffer",
            offset,
            needed: size,
            available: bytes.len(),
        })
    }
}
