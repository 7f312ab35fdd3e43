//! Record definitions
//!
//! The structured values kept in a namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the shelf, never reused
    pub id: u64,

    pub title: String,

    pub author: String,
}

impl Book {
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?} by {}", self.id, self.title, self.author)
    }
}

/// A book that has not been given an identifier yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Attach a minted identifier
    pub fn with_id(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}
