//! Table registration.
//!
//! A [`Catalog`] collects the tables a server exposes. Registration is the
//! single choke point where table names are checked: each table's
//! lowercased name becomes a URL path segment, so the rules here are
//! really routing rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use shelf_store::Table;
use thiserror::Error;

/// Path segment reserved for the search routes.
const SEARCH_SEGMENT: &str = "search";

/// Errors raised while registering a table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The table's name was empty.
    #[error("table name is empty")]
    EmptyName,

    /// The table's name contained a character that cannot appear in a
    /// route segment.
    #[error("table name {name:?} contains invalid character {found:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// The offending character.
        found: char,
    },

    /// A table with the same name is already registered.
    #[error("table {name:?} is already registered")]
    Duplicate {
        /// The conflicting name.
        name: String,
    },

    /// The table's name collides with a reserved route segment.
    #[error("table name {name:?} is reserved")]
    Reserved {
        /// The reserved name.
        name: String,
    },
}

/// An ordered registry of the tables exposed over the REST surface.
///
/// Iteration order is the lexicographic order of table names, which keeps
/// route construction and logs deterministic.
#[derive(Default)]
pub struct Catalog {
    tables: BTreeMap<String, Arc<dyn Table>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under its lowercased name.
    ///
    /// Lowercased names must be non-empty, consist of ASCII letters,
    /// digits, `_`, or `-`, and must not collide with another table or the
    /// reserved `search` segment. Registration fails fast so a
    /// misconfigured server never starts serving a partial surface.
    pub fn register(&mut self, table: Arc<dyn Table>) -> Result<(), CatalogError> {
        let segment = table.name().to_lowercase();

        if segment.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if segment == SEARCH_SEGMENT {
            return Err(CatalogError::Reserved { name: segment });
        }
        if let Some(found) = segment.chars().find(|c| !is_segment_char(*c)) {
            return Err(CatalogError::InvalidName {
                name: segment,
                found,
            });
        }
        if self.tables.contains_key(&segment) {
            return Err(CatalogError::Duplicate { name: segment });
        }

        self.tables.insert(segment, table);
        Ok(())
    }

    /// Looks up a registered table by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Table>> {
        self.tables.get(name).cloned()
    }

    /// Iterates over registered tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Table>)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Iterates over registered table names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-')
}
