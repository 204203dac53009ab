//! Delete handler.
//!
//! Serves `DELETE /<table>/<key>`. Storage failures on this route, a
//! missing record included, surface as storage faults rather than
//! not-found responses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_store::RecordKey;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::ResourceState;

/// Handler for the delete interaction.
///
/// # HTTP Request
///
/// `DELETE /<table>/<key>`
///
/// # Response
///
/// - `200 OK` - Record deleted, body is the JSON string `"Completed"`
/// - `400 Bad Request` - The key is not a valid record key
/// - `500 Internal Server Error` - The delete or the commit failed
///
/// # Example
///
/// ```http
/// DELETE /books/ABC99 HTTP/1.1
/// Host: shelf.example.com
/// ```
pub async fn delete_handler(
    State(state): State<ResourceState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let key: RecordKey = key.parse()?;
    debug!(table = state.name(), key = %key, "Processing delete request");

    state
        .table()
        .delete(&key)
        .await
        .map_err(|err| ApiError::StorageFailure {
            message: err.to_string(),
        })?;

    state.table().commit().await.map_err(|err| {
        warn!(table = state.name(), error = %err, "Commit failed after delete");
        ApiError::CommitFailure {
            message: err.to_string(),
        }
    })?;

    debug!(table = state.name(), key = %key, "Record deleted");
    Ok((StatusCode::OK, Json("Completed")).into_response())
}
