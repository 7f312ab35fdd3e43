//! Store Module
//!
//! Owns the handle on the store file.
//!
//! ## Responsibilities
//! - Create the file with fixed permission bits
//! - Wait a bounded time for the exclusive file lock
//! - Hand out [`Namespace`] adapters bound to the handle
//! - Enumerate the namespaces in the file
//!
//! The lock is released when the [`Store`] is dropped.

mod namespace;

pub use namespace::{Entry, Namespace};

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError, TableHandle};

use crate::config::Config;
use crate::error::{BookshelfError, Result};

/// Delay between attempts to take the file lock
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// An open store file
pub struct Store {
    db: Database,
    path: PathBuf,
}

impl Store {
    /// Open or create the store file named by `config`
    ///
    /// If another handle holds the file, retries until
    /// `config.lock_timeout_ms` has elapsed.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let path = config.db_path.clone();
        let timeout = Duration::from_millis(config.lock_timeout_ms);
        let started = Instant::now();

        loop {
            let file = Self::open_file(&path, config.file_mode)?;

            match Database::builder().create_file(file) {
                Ok(db) => {
                    tracing::info!(path = %path.display(), "store opened");
                    return Ok(Self { db, path });
                }
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(BookshelfError::StoreLockTimeout {
                            path,
                            waited_ms: waited.as_millis() as u64,
                        });
                    }
                    tracing::debug!(path = %path.display(), "store locked, retrying");
                    thread::sleep(LOCK_RETRY_INTERVAL.min(timeout - waited));
                }
                Err(source) => return Err(BookshelfError::StoreOpen { path, source }),
            }
        }
    }

    #[cfg(unix)]
    fn open_file(path: &Path, mode: u32) -> Result<File> {
        use std::os::unix::fs::OpenOptionsExt;

        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(mode)
            .open(path)?)
    }

    #[cfg(not(unix))]
    fn open_file(path: &Path, _mode: u32) -> Result<File> {
        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?)
    }

    /// Adapter for the namespace called `name`
    ///
    /// Nothing is created until the namespace is first written.
    pub fn namespace(&self, name: &str) -> Namespace<'_> {
        Namespace::new(&self.db, name)
    }

    /// Names of every namespace in the file, in store order
    pub fn list_namespaces(&self) -> Result<Vec<String>> {
        let txn = self.db.begin_read().map_err(BookshelfError::read)?;
        let tables = txn.list_tables().map_err(BookshelfError::read)?;
        let names = tables.map(|table| table.name().to_string()).collect();
        Ok(names)
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
