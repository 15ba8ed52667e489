//! Helpers for poking at undocumented binary layouts.
//!
//! Large parts of the server formats are still unknown, so the CLI exposes hex
//! dumps and byte-wise comparisons built from these.

use std::fmt::Write;

/// Render bytes as printable ASCII, with `.` for anything outside 0x20..=0x7E.
pub fn printable(data: &[u8]) -> String {
    data.iter()
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
        .collect()
}

/// Classic 16-bytes-per-row hex dump.
///
/// `base` is the offset printed for the first row, so a dump of a segment can
/// show offsets relative to the whole archive.
pub fn hexdump(data: &[u8], base: usize) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(16).enumerate() {
        let _ = write!(out, "{:08x}  ", base + row * 16);
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => {
                    let _ = write!(out, "{:02x} ", b);
                }
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }
        let _ = writeln!(out, " |{}|", printable(chunk));
    }
    out
}

/// Result of comparing two buffers byte by byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteComparison {
    /// Offsets where both buffers hold the same byte.
    pub matching: Vec<usize>,
    /// Offsets where the buffers differ.
    pub differing: Vec<usize>,
    /// Length of the longer buffer minus the shorter one.
    pub length_difference: usize,
}

impl ByteComparison {
    /// True when the buffers are byte-identical, including length.
    pub fn is_identical(&self) -> bool {
        self.differing.is_empty() && self.length_difference == 0
    }
}

/// Compare two buffers over their common prefix.
///
/// Offsets are zero-based.
pub fn compare(a: &[u8], b: &[u8]) -> ByteComparison {
    let mut result = ByteComparison {
        length_difference: a.len().abs_diff(b.len()),
        ..Default::default()
    };

    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        if x == y {
            result.matching.push(i);
        } else {
            result.differing.push(i);
        }
    }

    result
}
