//! Record codec
//!
//! Encoding and decoding of [`Book`] values as they are stored in a
//! namespace.
//!
//! ## Value Format
//! ```text
//! ┌────────────┬──────────┬─────────────────────────────┐
//! │Version (1) │ CRC (4)  │    bincode(Book) payload     │
//! └────────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! The CRC32 is little-endian and covers the payload only. bincode writes
//! fields by position with no tags, so the version byte is the schema
//! marker: any change to the `Book` layout needs a new [`FORMAT_VERSION`].

use crate::error::{BookshelfError, Result};
use crate::record::Book;

/// Current value format version
pub const FORMAT_VERSION: u8 = 1;

/// Header size: 1 byte version + 4 bytes CRC
pub const HEADER_SIZE: usize = 5;

/// Encode a book to bytes
pub fn encode(book: &Book) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(book).map_err(|e| BookshelfError::Encoding(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode a book from bytes
pub fn decode(bytes: &[u8]) -> Result<Book> {
    if bytes.len() < HEADER_SIZE {
        return Err(BookshelfError::Decoding(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let version = bytes[0];
    if version != FORMAT_VERSION {
        return Err(BookshelfError::Decoding(format!(
            "Unknown format version: 0x{:02x}",
            version
        )));
    }

    let expected_crc = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
    let payload = &bytes[HEADER_SIZE..];
    let actual_crc = crc32fast::hash(payload);
    if expected_crc != actual_crc {
        return Err(BookshelfError::Decoding(format!(
            "CRC mismatch: stored 0x{:08x}, computed 0x{:08x}",
            expected_crc, actual_crc
        )));
    }

    bincode::deserialize(payload).map_err(|e| BookshelfError::Decoding(e.to_string()))
}
