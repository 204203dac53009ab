//! Record key parsing and generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::KeyError;

/// Maximum accepted key length in bytes.
pub const MAX_KEY_LEN: usize = 64;

/// A validated record key.
///
/// Keys are non-empty strings of at most [`MAX_KEY_LEN`] bytes drawn from
/// ASCII letters, digits, `.`, `_`, and `-`. That alphabet keeps every key
/// usable as a single URL path segment without escaping, so keys travel
/// verbatim between route paths and table lookups.
///
/// ```
/// use shelf_store::RecordKey;
///
/// let key: RecordKey = "book-12".parse().unwrap();
/// assert_eq!(key.as_str(), "book-12");
/// assert!("no/slashes".parse::<RecordKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordKey(String);

impl RecordKey {
    /// Generates a fresh random key.
    ///
    /// Used for records whose type carries no natural key of its own.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyError::Empty);
        }
        if s.len() > MAX_KEY_LEN {
            return Err(KeyError::TooLong {
                len: s.len(),
                max: MAX_KEY_LEN,
            });
        }
        if let Some(found) = s.chars().find(|c| !is_key_char(*c)) {
            return Err(KeyError::InvalidCharacter { found });
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for RecordKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self {
        key.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
