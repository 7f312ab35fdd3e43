//! Key derivation
//!
//! Maps record identifiers to the byte keys they are stored under, and back.
//!
//! The store orders keys byte-lexicographically. The legacy [`key_for`]
//! scheme writes unpadded decimal text, so `"10"` sorts before `"2"`.
//! [`KeyScheme::PaddedDecimal`] and [`KeyScheme::BigEndian`] keep keys in
//! numeric order.

use std::fmt;
use std::str::FromStr;

use crate::error::{BookshelfError, Result};

/// Digits needed for `u64::MAX`
pub const PADDED_WIDTH: usize = 20;

/// Decimal text of `id` with no padding
pub fn key_for(id: u64) -> Vec<u8> {
    id.to_string().into_bytes()
}

/// How identifiers are written as keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyScheme {
    /// Unpadded decimal text (legacy layout)
    #[default]
    Decimal,

    /// Decimal text zero-padded to [`PADDED_WIDTH`] digits
    PaddedDecimal,

    /// 8-byte big-endian integer
    BigEndian,
}

/// Base used to read an identifier back out of decimal-scheme keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdRadix {
    /// Base 16. Legacy files were resolved this way even though their keys
    /// are written in base 10.
    #[default]
    Hexadecimal,

    Decimal,
}

impl IdRadix {
    pub fn base(self) -> u32 {
        match self {
            IdRadix::Hexadecimal => 16,
            IdRadix::Decimal => 10,
        }
    }
}

impl KeyScheme {
    /// Encode an identifier as a key
    pub fn encode(self, id: u64) -> Vec<u8> {
        match self {
            KeyScheme::Decimal => key_for(id),
            KeyScheme::PaddedDecimal => format!("{:0width$}", id, width = PADDED_WIDTH).into_bytes(),
            KeyScheme::BigEndian => id.to_be_bytes().to_vec(),
        }
    }

    /// Recover an identifier from a key
    ///
    /// `radix` only applies to the decimal schemes.
    pub fn decode(self, key: &[u8], radix: IdRadix) -> Result<u64> {
        match self {
            KeyScheme::Decimal | KeyScheme::PaddedDecimal => parse_text(key, radix),
            KeyScheme::BigEndian => {
                let bytes: [u8; 8] = key.try_into().map_err(|_| BookshelfError::IdParse {
                    key: display_key(key),
                    reason: format!("expected 8 bytes, got {}", key.len()),
                })?;
                Ok(u64::from_be_bytes(bytes))
            }
        }
    }
}

/// Parse key text as an unsigned integer in the given radix
///
/// Only ASCII digits of the radix are accepted; `from_str_radix` alone would
/// also take a leading `+`.
fn parse_text(key: &[u8], radix: IdRadix) -> Result<u64> {
    let parse_error = |reason: String| BookshelfError::IdParse {
        key: display_key(key),
        reason,
    };

    let text = std::str::from_utf8(key).map_err(|e| parse_error(e.to_string()))?;
    if text.is_empty() {
        return Err(parse_error("empty key".to_string()));
    }
    if let Some(c) = text.chars().find(|c| !c.is_digit(radix.base())) {
        return Err(parse_error(format!(
            "invalid digit {:?} for base {}",
            c,
            radix.base()
        )));
    }

    u64::from_str_radix(text, radix.base()).map_err(|e| parse_error(e.to_string()))
}

/// Printable form of a key for logs and errors
pub fn display_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(text) if text.chars().all(|c| !c.is_control()) => text.to_string(),
        _ => key.iter().map(|b| format!("{:02x}", b)).collect(),
    }
}

// =============================================================================
// Text forms (CLI and config)
// =============================================================================

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyScheme::Decimal => "decimal",
            KeyScheme::PaddedDecimal => "padded",
            KeyScheme::BigEndian => "big-endian",
        })
    }
}

impl FromStr for KeyScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" => Ok(KeyScheme::Decimal),
            "padded" | "padded-decimal" => Ok(KeyScheme::PaddedDecimal),
            "big-endian" | "be" => Ok(KeyScheme::BigEndian),
            other => Err(format!(
                "unknown key scheme {:?} (expected decimal, padded or big-endian)",
                other
            )),
        }
    }
}

impl fmt::Display for IdRadix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdRadix::Hexadecimal => "hex",
            IdRadix::Decimal => "decimal",
        })
    }
}

impl FromStr for IdRadix {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" | "16" => Ok(IdRadix::Hexadecimal),
            "decimal" | "10" => Ok(IdRadix::Decimal),
            other => Err(format!(
                "unknown id radix {:?} (expected hex or decimal)",
                other
            )),
        }
    }
}
