//! Shelf Module
//!
//! Books in one namespace: identifier minting, encoding and read-back.
//!
//! ## Write path
//! 1. Resolve the last identifier
//! 2. Mint one identifier per draft
//! 3. Encode each book
//! 4. Write the whole batch in one transaction, refusing existing keys
//!
//! ## Read path
//! Scans decode record by record; a value that fails to decode is reported
//! in place and does not stop the scan.

use crate::codec;
use crate::config::Config;
use crate::error::{BookshelfError, Result};
use crate::key::{display_key, IdRadix, KeyScheme};
use crate::record::{Book, NewBook};
use crate::resolver::{self, IdSequence};
use crate::store::{Namespace, Store};

/// Books stored in a single namespace
pub struct Shelf<'s> {
    namespace: Namespace<'s>,
    key_scheme: KeyScheme,
    id_radix: IdRadix,
}

impl<'s> Shelf<'s> {
    /// Shelf over `config.namespace` in `store`
    pub fn new(store: &'s Store, config: &Config) -> Self {
        Self {
            namespace: store.namespace(&config.namespace),
            key_scheme: config.key_scheme,
            id_radix: config.id_radix,
        }
    }

    /// Underlying namespace adapter
    pub fn namespace(&self) -> &Namespace<'s> {
        &self.namespace
    }

    /// Key a book with identifier `id` is stored under
    pub fn key_for(&self, id: u64) -> Vec<u8> {
        self.key_scheme.encode(id)
    }

    /// Highest identifier in use, 0 when it cannot be determined
    pub fn last_id(&self) -> Result<u64> {
        resolver::resolve_last_id_or_zero(&self.namespace, self.key_scheme, self.id_radix)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Assign identifiers to `drafts` and store them
    ///
    /// Returns the stored books in the order given. Existing books are never
    /// replaced: if a minted id is already stored the whole batch is rejected
    /// with `IdCollision`. The legacy layout resolves the lexicographic
    /// maximum, so past 9 books it mints ids that are in use.
    pub fn add(&self, drafts: Vec<NewBook>) -> Result<Vec<Book>> {
        let mut ids = IdSequence::after(self.last_id()?);

        let mut books = Vec::with_capacity(drafts.len());
        let mut entries = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let book = draft.with_id(ids.mint()?);
            entries.push((self.key_for(book.id), codec::encode(&book)?));
            books.push(book);
        }

        self.namespace.insert_new(&entries).map_err(|e| match e {
            BookshelfError::KeyExists { key } => {
                let clashing = books
                    .iter()
                    .map(|b| b.id)
                    .find(|&id| display_key(&self.key_for(id)) == key);
                match clashing {
                    Some(id) => BookshelfError::IdCollision { id },
                    None => BookshelfError::KeyExists { key },
                }
            }
            other => other,
        })?;

        tracing::debug!(
            namespace = %self.namespace.name(),
            count = books.len(),
            last_id = ids.last(),
            "books added"
        );
        Ok(books)
    }

    /// Store `book` under its own identifier, replacing any previous value
    pub fn put(&self, book: &Book) -> Result<()> {
        let value = codec::encode(book)?;
        self.namespace.put(&self.key_for(book.id), &value)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Book stored under exactly `id`
    pub fn get(&self, id: u64) -> Result<Option<Book>> {
        let key = self.key_for(id);
        match self.namespace.get(&key)? {
            Some(value) => decode_entry(&key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// First book whose key is at or after the key for `id`
    ///
    /// With the decimal scheme "after" is lexicographic: seeking 2 can
    /// land on 20.
    pub fn seek(&self, id: u64) -> Result<Option<Book>> {
        match self.namespace.seek(&self.key_for(id))? {
            Some((key, value)) => decode_entry(&key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Every record in key order, each decoded on its own
    pub fn scan(&self) -> Result<Vec<Result<Book>>> {
        let entries = self.namespace.scan_all()?;
        Ok(entries
            .iter()
            .map(|(key, value)| decode_entry(key, value))
            .collect())
    }

    /// Every book that decodes; the rest are logged and skipped
    pub fn books(&self) -> Result<Vec<Book>> {
        let mut books = Vec::new();
        for item in self.scan()? {
            match item {
                Ok(book) => books.push(book),
                Err(e) => {
                    tracing::warn!(namespace = %self.namespace.name(), error = %e, "skipping record")
                }
            }
        }
        Ok(books)
    }

    /// Look up by identifier text
    ///
    /// A positive number seeks to that identifier; empty, zero or
    /// non-numeric text (surrounding whitespace included) lists every book.
    pub fn lookup(&self, id: &str) -> Result<Vec<Book>> {
        match id.parse::<u64>() {
            Ok(id) if id > 0 => Ok(self.seek(id)?.into_iter().collect()),
            _ => self.books(),
        }
    }
}

fn decode_entry(key: &[u8], value: &[u8]) -> Result<Book> {
    codec::decode(value).map_err(|e| BookshelfError::CorruptRecord {
        key: display_key(key),
        source: Box::new(e),
    })
}
