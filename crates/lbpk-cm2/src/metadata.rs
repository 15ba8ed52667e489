//! Track metadata carried in the CM2 segment.

use lbpk_common::{search, ByteCursor, Error, Result, UniqueId};

use crate::{sanitize_track_name, Cm2Header};

/// Offset of the NUL-terminated display name within the segment.
pub const DISPLAY_NAME_OFFSET: usize = 44;

/// Offset of the 4 unique id bytes within the segment.
pub const UNIQUE_ID_OFFSET: usize = 112;

/// The decoded metadata fields of one track.
///
/// Owns its strings; nothing here borrows from the segment once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cm2Metadata {
    /// The identifier used in output file names.
    pub unique_id: UniqueId,
    /// Track name as shown in game. Invalid UTF-8 is replaced, never rejected.
    pub display_name: String,
    /// Track description, located via the display-name anchor.
    pub description: String,
}

impl Cm2Metadata {
    /// Parse a whole CM2 segment (header plus payload).
    ///
    /// Fails on a bad header, a segment too short to hold the unique id, or
    /// when the display name does not occur twice.
    pub fn parse(segment: &[u8]) -> Result<Self> {
        Cm2Header::read(segment)?.payload_size()?;

        let unique_id = unique_id(segment)?;
        let name = display_name_bytes(segment);
        let description = description_bytes(segment, name)?;

        Ok(Self {
            unique_id,
            display_name: String::from_utf8_lossy(name).into_owned(),
            description: String::from_utf8_lossy(description).into_owned(),
        })
    }

    /// The display name reduced to `[A-Z0-9_]`-style characters.
    pub fn sanitized_name(&self) -> String {
        sanitize_track_name(&self.display_name)
    }

    /// `<SANITIZED NAME>_<UNIQUE ID>`, the stem every output file must use.
    ///
    /// The game deletes track files whose names do not follow this exactly.
    pub fn base_filename(&self) -> String {
        format!("{}_{}", self.sanitized_name(), self.unique_id)
    }
}

/// Read the unique id at `[112:116)`.
pub fn unique_id(segment: &[u8]) -> Result<UniqueId> {
    let bytes = ByteCursor::new(segment)
        .slice_at(UNIQUE_ID_OFFSET, UniqueId::LEN)
        .map_err(|_| Error::FieldOutOfBounds {
            field: "unique id",
            start: UNIQUE_ID_OFFSET,
            end: UNIQUE_ID_OFFSET + UniqueId::LEN,
            segment_len: segment.len(),
        })?;

    let mut raw = [0u8; UniqueId::LEN];
    raw.copy_from_slice(bytes);
    Ok(UniqueId::from_bytes(raw))
}

/// The raw display name bytes starting at offset 44.
///
/// Stops at the first NUL or the segment end. A segment shorter than the
/// offset gives an empty name.
pub fn display_name_bytes(segment: &[u8]) -> &[u8] {
    ByteCursor::new(segment).cstr_bytes_at(DISPLAY_NAME_OFFSET)
}

/// The raw description bytes, found relative to the second copy of `name`.
///
/// The run starts one byte past the end of the second occurrence (skipping
/// the name's NUL) and ends at the next NUL. If that start lies past the end
/// of the segment the description is empty.
pub fn description_bytes<'a>(segment: &'a [u8], name: &[u8]) -> Result<&'a [u8]> {
    let first = search::find_pattern(name, segment).ok_or(Error::AnchorNotFound)?;
    let second = search::find_pattern_from(name, segment, first + 1)
        .ok_or(Error::SecondAnchorNotFound { first })?;

    let start = second + name.len() + 1;
    Ok(ByteCursor::new(segment).cstr_bytes_at(start))
}
