//! Update handler.
//!
//! Serves `PUT /<table>/<key>`: a field-level merge. The body is a partial
//! record; its populated fields overwrite the stored record's, everything
//! else is kept, and the result is written back under the original key.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_store::RecordKey;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::ResourceState;

/// Handler for the update interaction.
///
/// # HTTP Request
///
/// `PUT /<table>/<key>`
///
/// # Response
///
/// - `200 OK` - Record updated, empty body
/// - `400 Bad Request` - The key is invalid, the body does not decode, or
///   the merged record failed validation
/// - `404 Not Found` - No record exists under the key, including a record
///   deleted between lookup and write
/// - `500 Internal Server Error` - The merge itself failed, or the updated
///   table could not be committed
///
/// # Example
///
/// ```http
/// PUT /books/ABC99 HTTP/1.1
/// Host: shelf.example.com
/// Content-Type: application/json
///
/// {"title": "How to API, 2nd Edition"}
/// ```
pub async fn update_handler(
    State(state): State<ResourceState>,
    Path(key): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let key: RecordKey = key.parse()?;
    debug!(table = state.name(), key = %key, "Processing update request");

    let incoming = state
        .table()
        .decode_record(&body)
        .map_err(|err| ApiError::MalformedBody {
            message: err.to_string(),
        })?;

    let current = state.table().find_by_key(&key).await?;

    let merged = state
        .table()
        .merge(current.record, incoming)
        .map_err(|err| ApiError::MergeFailure {
            message: err.to_string(),
        })?;

    state.table().update(&key, merged).await?;

    state.table().commit().await.map_err(|err| {
        warn!(table = state.name(), error = %err, "Commit failed after update");
        ApiError::CommitFailure {
            message: err.to_string(),
        }
    })?;

    debug!(table = state.name(), key = %key, "Record updated");
    Ok(StatusCode::OK.into_response())
}
