//! Error types for table storage operations.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Errors returned by table storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists under the requested key.
    #[error("record not found: {table}/{key}")]
    NotFound { table: String, key: String },

    /// A record already exists under the derived key.
    #[error("record already exists: {table}/{key}")]
    AlreadyExists { table: String, key: String },

    /// The record failed domain validation.
    #[error(transparent)]
    Invalid(#[from] InvalidRecord),

    /// A payload could not be decoded into the table's record type.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The table could not persist its contents.
    #[error("commit failed for table {table}: {reason}")]
    Commit { table: String, reason: String },

    /// A snapshot file could not be read or parsed.
    #[error("snapshot load failed for table {table}: {reason}")]
    Snapshot { table: String, reason: String },
}

/// A record rejected by domain validation.
#[derive(Error, Debug)]
#[error("invalid record: {reason}")]
pub struct InvalidRecord {
    /// Description of the failed constraint.
    pub reason: String,
}

impl InvalidRecord {
    /// Creates a validation failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A payload that could not be decoded into a table's record type.
#[derive(Error, Debug)]
#[error("decode failed: {reason}")]
pub struct DecodeError {
    /// Parser failure description.
    pub reason: String,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

/// Errors raised while parsing a record key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key was empty.
    #[error("record key is empty")]
    Empty,

    /// The key exceeded the maximum length.
    #[error("record key is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The key contained a character outside the accepted alphabet.
    #[error("record key contains invalid character {found:?}")]
    InvalidCharacter { found: char },
}

/// Result type for table storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
