//! # bookshelf
//!
//! Book records keyed by monotonically increasing identifiers, stored in an
//! embedded ordered key-value store ([redb]):
//! - Keys derived from identifiers (legacy decimal text, or ordered schemes)
//! - Last identifier recovered from the greatest key of a namespace
//! - Checksummed binary record encoding
//! - Namespace enumeration
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Shelf                               │
//! │              (mint ids / encode / read back)                 │
//! └──────┬──────────────────┬──────────────────┬────────────────┘
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//!   ┌──────────┐      ┌───────────┐      ┌──────────┐
//!   │ Resolver │      │   Codec   │      │   Key    │
//!   │ (last id)│      │ (bincode) │      │ (scheme) │
//!   └────┬─────┘      └───────────┘      └──────────┘
//!        │
//!        ▼
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                  Namespace (one table)                       │
//!   │           put / scan_all / seek / last_key                   │
//!   └─────────────────────┬───────────────────────────────────────┘
//!                         │
//!                         ▼
//!                 ┌──────────────┐
//!                 │    Store     │
//!                 │ (redb file)  │
//!                 └──────────────┘
//! ```
//!
//! [redb]: https://docs.rs/redb

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod codec;
pub mod key;
pub mod store;
pub mod resolver;
pub mod shelf;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BookshelfError, Result};
pub use config::Config;
pub use key::{key_for, IdRadix, KeyScheme};
pub use record::{Book, NewBook};
pub use store::{Namespace, Store};
pub use shelf::Shelf;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bookshelf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
