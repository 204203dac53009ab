//! Error types for the REST surface.
//!
//! This module defines the errors handlers return, with automatic
//! conversion to JSON error responses.
//!
//! # Error Mapping
//!
//! Storage errors are mapped to HTTP status codes and stable
//! machine-readable kinds:
//!
//! | Error | HTTP Status | Kind |
//! |-------|-------------|------|
//! | MalformedKey | 400 | malformed_key |
//! | MalformedBody | 400 | malformed_body |
//! | MalformedSearchToken | 400 | malformed_search_token |
//! | Rejected | 400 | rejected |
//! | NotFound | 404 | not_found |
//! | DecodeFailure | 500 | decode_failure |
//! | MergeFailure | 500 | merge_failure |
//! | CommitFailure | 500 | commit_failure |
//! | StorageFailure | 500 | storage_failure |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shelf_store::{KeyError, StoreError};
use std::fmt;

/// The primary error type for REST operations.
///
/// Every variant maps to one status code and one machine-readable kind;
/// the [`IntoResponse`] implementation renders both together with a
/// human-readable message.
#[derive(Debug)]
pub enum ApiError {
    /// The record key in the path failed validation (HTTP 400).
    MalformedKey {
        /// Why the key was rejected.
        message: String,
    },

    /// The request body could not be decoded into the table's record type
    /// (HTTP 400).
    MalformedBody {
        /// Decoder failure description.
        message: String,
    },

    /// The search token was not valid URL-safe base64 (HTTP 400).
    MalformedSearchToken {
        /// The offending token.
        token: String,
    },

    /// No record exists under the requested key (HTTP 404).
    NotFound {
        /// The table that was searched.
        table: String,
        /// The requested key.
        key: String,
    },

    /// The table rejected the record (HTTP 400).
    Rejected {
        /// Why the record was rejected.
        message: String,
    },

    /// Stored data or a decoded search template failed to deserialize
    /// (HTTP 500).
    DecodeFailure {
        /// Error message.
        message: String,
    },

    /// A partial update could not be merged into the stored record
    /// (HTTP 500).
    MergeFailure {
        /// Error message.
        message: String,
    },

    /// The table failed to persist its contents (HTTP 500).
    CommitFailure {
        /// Error message.
        message: String,
    },

    /// The storage layer failed in a way the client cannot repair
    /// (HTTP 500).
    StorageFailure {
        /// Error message.
        message: String,
    },
}

impl ApiError {
    /// Machine-readable kind rendered in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MalformedKey { .. } => "malformed_key",
            ApiError::MalformedBody { .. } => "malformed_body",
            ApiError::MalformedSearchToken { .. } => "malformed_search_token",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Rejected { .. } => "rejected",
            ApiError::DecodeFailure { .. } => "decode_failure",
            ApiError::MergeFailure { .. } => "merge_failure",
            ApiError::CommitFailure { .. } => "commit_failure",
            ApiError::StorageFailure { .. } => "storage_failure",
        }
    }

    /// Status code the error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedKey { .. }
            | ApiError::MalformedBody { .. }
            | ApiError::MalformedSearchToken { .. }
            | ApiError::Rejected { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DecodeFailure { .. }
            | ApiError::MergeFailure { .. }
            | ApiError::CommitFailure { .. }
            | ApiError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MalformedKey { message } => {
                write!(f, "Malformed record key: {}", message)
            }
            ApiError::MalformedBody { message } => {
                write!(f, "Malformed record body: {}", message)
            }
            ApiError::MalformedSearchToken { token } => {
                write!(f, "Malformed search token: {}", token)
            }
            ApiError::NotFound { table, key } => {
                write!(f, "Record not found: {}/{}", table, key)
            }
            ApiError::Rejected { message } => {
                write!(f, "Record rejected: {}", message)
            }
            ApiError::DecodeFailure { message } => {
                write!(f, "Decode failure: {}", message)
            }
            ApiError::MergeFailure { message } => {
                write!(f, "Merge failure: {}", message)
            }
            ApiError::CommitFailure { message } => {
                write!(f, "Commit failure: {}", message)
            }
            ApiError::StorageFailure { message } => {
                write!(f, "Storage failure: {}", message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        }));
        (self.status(), body).into_response()
    }
}

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        ApiError::MalformedKey {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { table, key } => ApiError::NotFound { table, key },
            StoreError::AlreadyExists { table, key } => ApiError::Rejected {
                message: format!("record already exists: {}/{}", table, key),
            },
            StoreError::Invalid(err) => ApiError::Rejected {
                message: err.to_string(),
            },
            StoreError::Decode(err) => ApiError::DecodeFailure {
                message: err.to_string(),
            },
            StoreError::Commit { table, reason } => ApiError::CommitFailure {
                message: format!("commit failed for table {}: {}", table, reason),
            },
            StoreError::Snapshot { table, reason } => ApiError::StorageFailure {
                message: format!("snapshot load failed for table {}: {}", table, reason),
            },
        }
    }
}

/// Result type for REST handlers.
pub type ApiResult<T> = Result<T, ApiError>;
