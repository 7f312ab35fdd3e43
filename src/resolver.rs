//! Last-key resolver
//!
//! Recovers the highest identifier handed out in a namespace and mints the
//! ones that follow it.

use crate::error::{BookshelfError, Result};
use crate::key::{IdRadix, KeyScheme};
use crate::store::Namespace;

/// Identifier stored under the greatest key of `namespace`
///
/// Creates the namespace if it is missing. An empty namespace resolves to 0,
/// so the first minted identifier is 1.
///
/// With the legacy `Decimal` + `Hexadecimal` pair a key written as `"10"`
/// resolves to 16. The greatest key is also the lexicographic maximum, not
/// the numeric one.
pub fn resolve_last_id(namespace: &Namespace<'_>, scheme: KeyScheme, radix: IdRadix) -> Result<u64> {
    namespace.ensure()?;

    match namespace.last_key()? {
        Some(key) => scheme.decode(&key, radix),
        None => Ok(0),
    }
}

/// Like [`resolve_last_id`], but an unparseable key resolves to 0
///
/// Store failures still propagate.
pub fn resolve_last_id_or_zero(
    namespace: &Namespace<'_>,
    scheme: KeyScheme,
    radix: IdRadix,
) -> Result<u64> {
    match resolve_last_id(namespace, scheme, radix) {
        Err(err @ BookshelfError::IdParse { .. }) => {
            tracing::warn!(namespace = %namespace.name(), error = %err, "falling back to last id 0");
            Ok(0)
        }
        other => other,
    }
}

/// Identifiers minted in memory after a resolved last id
#[derive(Debug, Clone)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Sequence whose first minted id is `last + 1`
    pub fn after(last: u64) -> Self {
        Self { last }
    }

    /// Mint the next identifier
    pub fn mint(&mut self) -> Result<u64> {
        let next = self
            .last
            .checked_add(1)
            .ok_or(BookshelfError::IdExhausted { last: self.last })?;
        self.last = next;
        Ok(next)
    }

    /// Most recently minted identifier, or the starting point
    pub fn last(&self) -> u64 {
        self.last
    }
}
