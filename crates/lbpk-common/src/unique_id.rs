//! Track unique identifier.
//!
//! Every community track carries four raw bytes that, rendered as uppercase
//! hex, form the second half of its file names (`NAME_1A2B00FF.TRK`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 4-byte track identifier.
///
/// Displays as exactly eight uppercase hex digits with no separators, in byte
/// order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UniqueId {
    bytes: [u8; 4],
}

impl UniqueId {
    /// Length of the identifier in bytes.
    pub const LEN: usize = 4;

    /// Create a new UniqueId from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.bytes
    }
}

impl fmt::Debug for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniqueId({})", self)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Error returned when a string is not eight hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid unique id {0:?}: expected 8 hex digits")]
pub struct ParseUniqueIdError(String);

impl FromStr for UniqueId {
    type Err = ParseUniqueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseUniqueIdError(s.to_string());

        if s.len() != Self::LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }

        Ok(Self { bytes })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UniqueId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UniqueId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase_hex() {
        let id = UniqueId::from_bytes([0x00, 0x0A, 0xFF, 0x10]);
        assert_eq!(id.to_string(), "000AFF10");

        let id = UniqueId::from_bytes([0x1A, 0x2B, 0x00, 0xFF]);
        assert_eq!(id.to_string(), "1A2B00FF");
    }

    #[test]
    fn test_always_eight_chars() {
        for bytes in [[0u8; 4], [0xFF; 4], [0x01, 0x02, 0x03, 0x04]] {
            let s = UniqueId::from_bytes(bytes).to_string();
            assert_eq!(s.len(), 8);
            assert!(s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_parse() {
        let id: UniqueId = "1a2B00ff".parse().unwrap();
        assert_eq!(id.as_bytes(), &[0x1A, 0x2B, 0x00, 0xFF]);
    }

    #[test]
    fn test_invalid_length() {
        assert!("1A2B".parse::<UniqueId>().is_err());
        assert!("GG2B00FF".parse::<UniqueId>().is_err());
    }
}
