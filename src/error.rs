//! Error types for bookshelf
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using BookshelfError
pub type Result<T> = std::result::Result<T, BookshelfError>;

/// Unified error type for bookshelf operations
#[derive(Debug, Error)]
pub enum BookshelfError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Failed to open store at {}: {source}", .path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: redb::DatabaseError,
    },

    #[error("Timed out after {waited_ms} ms waiting for the lock on {}", .path.display())]
    StoreLockTimeout { path: PathBuf, waited_ms: u64 },

    #[error("Store write failed: {0}")]
    StoreWrite(#[source] redb::Error),

    #[error("Store read failed: {0}")]
    StoreRead(#[source] redb::Error),

    #[error("Key already present: {key:?}")]
    KeyExists { key: String },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Corrupt record under key {key:?}: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: Box<BookshelfError>,
    },

    // -------------------------------------------------------------------------
    // Identifier Errors
    // -------------------------------------------------------------------------
    #[error("Cannot parse identifier from key {key:?}: {reason}")]
    IdParse { key: String, reason: String },

    #[error("Identifier {id} is already in use")]
    IdCollision { id: u64 },

    #[error("Identifier space exhausted after {last}")]
    IdExhausted { last: u64 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookshelfError {
    /// Wrap a redb failure raised inside a read-write transaction
    pub(crate) fn write(err: impl Into<redb::Error>) -> Self {
        Self::StoreWrite(err.into())
    }

    /// Wrap a redb failure raised inside a read-only transaction
    pub(crate) fn read(err: impl Into<redb::Error>) -> Self {
        Self::StoreRead(err.into())
    }

    /// True for errors a caller may log and step past
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IdParse { .. } | Self::CorruptRecord { .. } | Self::Decoding(_)
        )
    }
}
