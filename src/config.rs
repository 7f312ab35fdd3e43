//! Configuration for bookshelf
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BookshelfError, Result};

pub use crate::key::{IdRadix, KeyScheme};

/// Main configuration for a bookshelf instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Path of the store file
    pub db_path: PathBuf,

    /// Permission bits used when the store file is created (unix only)
    pub file_mode: u32,

    /// How long to wait for the store file lock (milliseconds)
    pub lock_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Namespace Configuration
    // -------------------------------------------------------------------------
    /// Namespace the shelf reads and writes
    pub namespace: String,

    /// How identifiers are written as keys
    pub key_scheme: KeyScheme,

    /// Base used to read the last identifier back from decimal keys
    pub id_radix: IdRadix,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("books.db"),
            file_mode: 0o644,
            lock_timeout_ms: 10_000, // 10 seconds
            namespace: "books".to_string(),
            key_scheme: KeyScheme::Decimal,
            id_radix: IdRadix::Hexadecimal,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(BookshelfError::Config(
                "namespace must not be empty".to_string(),
            ));
        }
        if self.file_mode & !0o777 != 0 {
            return Err(BookshelfError::Config(format!(
                "file mode {:o} has bits outside 0o777",
                self.file_mode
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the permission bits for a newly created store file
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Set the lock wait (in milliseconds)
    pub fn lock_timeout_ms(mut self, ms: u64) -> Self {
        self.config.lock_timeout_ms = ms;
        self
    }

    /// Set the namespace name
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.config.namespace = name.into();
        self
    }

    /// Set the key scheme
    pub fn key_scheme(mut self, scheme: KeyScheme) -> Self {
        self.config.key_scheme = scheme;
        self
    }

    /// Set the radix used to resolve the last identifier
    pub fn id_radix(mut self, radix: IdRadix) -> Self {
        self.config.id_radix = radix;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
