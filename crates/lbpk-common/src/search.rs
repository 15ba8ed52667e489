//! Byte searching backed by memchr.
//!
//! memchr already picks AVX2/SSE2/NEON at runtime, so these are thin wrappers
//! that give the rest of the workspace one place to search from.

/// Find the first null byte in a slice, returning its index.
#[inline]
pub fn find_null(data: &[u8]) -> Option<usize> {
    memchr::memchr(0, data)
}

/// Find a multi-byte pattern in a slice.
///
/// An empty needle never matches.
#[inline]
pub fn find_pattern(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    memchr::memmem::find(haystack, needle)
}

/// Find a multi-byte pattern starting at or after `from`.
///
/// The returned index is absolute within `haystack`.
#[inline]
pub fn find_pattern_from(needle: &[u8], haystack: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    find_pattern(needle, tail).map(|pos| from + pos)
}

/// Find every (possibly overlapping) occurrence of a pattern.
pub fn find_all(needle: &[u8], haystack: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut from = 0;
    while let Some(pos) = find_pattern_from(needle, haystack, from) {
        positions.push(pos);
        from = pos + 1;
    }
    positions
}
