//! Namespace adapter
//!
//! One namespace of the store, seen as an ordered map of byte keys to byte
//! values. Every call runs in its own transaction.

use redb::{
    Database, ReadOnlyTable, ReadableTable, ReadableTableMetadata, Table, TableDefinition,
    TableError,
};

use crate::error::{BookshelfError, Result};
use crate::key::display_key;

type Bytes = &'static [u8];

/// A (key, value) pair copied out of the store
pub type Entry = (Vec<u8>, Vec<u8>);

/// Handle on a single namespace
///
/// Borrows the store; cheap to create and drop.
pub struct Namespace<'db> {
    db: &'db Database,
    name: String,
}

impl<'db> Namespace<'db> {
    pub(crate) fn new(db: &'db Database, name: impl Into<String>) -> Self {
        Self {
            db,
            name: name.into(),
        }
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> TableDefinition<'_, Bytes, Bytes> {
        TableDefinition::new(&self.name)
    }

    // =========================================================================
    // Transaction scopes
    // =========================================================================

    /// Run `f` against the table inside a read-write transaction
    ///
    /// The table is created if absent. The transaction commits only when
    /// `f` succeeds; on error it is dropped, which aborts it.
    fn update<T>(&self, f: impl FnOnce(&mut Table<'_, Bytes, Bytes>) -> Result<T>) -> Result<T> {
        let txn = self.db.begin_write().map_err(BookshelfError::write)?;
        let result = {
            let mut table = txn
                .open_table(self.definition())
                .map_err(BookshelfError::write)?;
            f(&mut table)?
        };
        txn.commit().map_err(BookshelfError::write)?;
        Ok(result)
    }

    /// Run `f` against the table inside a read-only transaction
    ///
    /// Returns `None` without calling `f` if the namespace does not exist.
    fn view<T>(&self, f: impl FnOnce(&ReadOnlyTable<Bytes, Bytes>) -> Result<T>) -> Result<Option<T>> {
        let txn = self.db.begin_read().map_err(BookshelfError::read)?;
        let table = match txn.open_table(self.definition()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(BookshelfError::read(e)),
        };
        f(&table).map(Some)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create the namespace if it does not exist yet
    pub fn ensure(&self) -> Result<()> {
        self.update(|_| Ok(()))
    }

    /// Insert or overwrite a single entry
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let replaced = self.update(|table| {
            let previous = table.insert(key, value).map_err(BookshelfError::write)?;
            Ok(previous.is_some())
        })?;

        tracing::debug!(
            namespace = %self.name,
            key = %display_key(key),
            replaced,
            "put"
        );
        Ok(())
    }

    /// Insert or overwrite a batch of entries in one transaction
    pub fn put_many(&self, entries: &[Entry]) -> Result<()> {
        self.update(|table| {
            for (key, value) in entries {
                table
                    .insert(key.as_slice(), value.as_slice())
                    .map_err(BookshelfError::write)?;
            }
            Ok(())
        })?;

        tracing::debug!(namespace = %self.name, count = entries.len(), "put_many");
        Ok(())
    }

    /// Insert a batch of entries whose keys must all be new
    ///
    /// If any key is already present the transaction is aborted, nothing
    /// is written, and `KeyExists` names the first clashing key.
    pub fn insert_new(&self, entries: &[Entry]) -> Result<()> {
        self.update(|table| {
            for (key, value) in entries {
                let previous = table
                    .insert(key.as_slice(), value.as_slice())
                    .map_err(BookshelfError::write)?;
                if previous.is_some() {
                    return Err(BookshelfError::KeyExists {
                        key: display_key(key),
                    });
                }
            }
            Ok(())
        })?;

        tracing::debug!(namespace = %self.name, count = entries.len(), "insert_new");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every entry, first key to last
    ///
    /// A namespace that does not exist reads as empty.
    pub fn scan_all(&self) -> Result<Vec<Entry>> {
        let entries = self.view(|table| {
            let mut entries = Vec::new();
            for item in table.iter().map_err(BookshelfError::read)? {
                let (key, value) = item.map_err(BookshelfError::read)?;
                entries.push((key.value().to_vec(), value.value().to_vec()));
            }
            Ok(entries)
        })?;

        Ok(entries.unwrap_or_default())
    }

    /// First entry whose key is greater than or equal to `key`
    pub fn seek(&self, key: &[u8]) -> Result<Option<Entry>> {
        let found = self.view(|table| {
            let mut range = table.range(key..).map_err(BookshelfError::read)?;
            match range.next() {
                Some(item) => {
                    let (k, v) = item.map_err(BookshelfError::read)?;
                    Ok(Some((k.value().to_vec(), v.value().to_vec())))
                }
                None => Ok(None),
            }
        })?;

        Ok(found.flatten())
    }

    /// Value stored under exactly `key`
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let found = self.view(|table| {
            let value = table.get(key).map_err(BookshelfError::read)?;
            Ok(value.map(|v| v.value().to_vec()))
        })?;

        Ok(found.flatten())
    }

    /// Greatest key in the namespace
    pub fn last_key(&self) -> Result<Option<Vec<u8>>> {
        let found = self.view(|table| {
            let last = table.last().map_err(BookshelfError::read)?;
            Ok(last.map(|(k, _)| k.value().to_vec()))
        })?;

        Ok(found.flatten())
    }

    /// Number of entries
    pub fn len(&self) -> Result<u64> {
        let len = self.view(|table| table.len().map_err(BookshelfError::read))?;
        Ok(len.unwrap_or(0))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
