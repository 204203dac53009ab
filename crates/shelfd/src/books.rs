//! Sample record model served by the shelf binary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelf_store::{InvalidRecord, Record, RecordKey};

/// A book on the shelf.
///
/// `id` is the record key. Books cannot be created without one, so the
/// table never generates keys for this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Natural key, for example an ISBN or catalog code.
    pub id: String,
    /// Title of the book.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication date, when known.
    pub published: Option<DateTime<Utc>>,
    /// Page count.
    pub pages: u32,
    /// Publisher or author website.
    pub website: String,
    /// Free-form description.
    pub description: String,
}

impl Record for Book {
    fn natural_key(&self) -> Option<RecordKey> {
        self.id.parse().ok()
    }

    fn validate(&self) -> Result<(), InvalidRecord> {
        if self.id.is_empty() {
            return Err(InvalidRecord::new("book id must not be empty"));
        }
        if self.id.parse::<RecordKey>().is_err() {
            return Err(InvalidRecord::new("book id must be usable as a key"));
        }
        if self.title.is_empty() {
            return Err(InvalidRecord::new("book title must not be empty"));
        }
        Ok(())
    }
}
