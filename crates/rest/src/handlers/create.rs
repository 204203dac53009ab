//! Create handler.
//!
//! Serves `POST /<table>`: decode, validate, store, commit. The table
//! derives the new record's key from its natural key field or generates
//! one.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::ResourceState;

/// Handler for the create interaction.
///
/// # HTTP Request
///
/// `POST /<table>`
///
/// # Response
///
/// - `200 OK` - The change set: the assigned key and the record as stored
/// - `400 Bad Request` - The body does not decode into the table's record
///   type, the record failed validation, or its key is already taken
/// - `500 Internal Server Error` - The record was stored but could not be
///   committed
///
/// # Example
///
/// ```http
/// POST /books HTTP/1.1
/// Host: shelf.example.com
/// Content-Type: application/json
///
/// {"id": "ABC99", "title": "How to API"}
/// ```
pub async fn create_handler(
    State(state): State<ResourceState>,
    body: Bytes,
) -> ApiResult<Response> {
    debug!(
        table = state.name(),
        bytes = body.len(),
        "Processing create request"
    );

    let record = state
        .table()
        .decode_record(&body)
        .map_err(|err| ApiError::MalformedBody {
            message: err.to_string(),
        })?;

    let change = state.table().create(record).await?;

    state.table().commit().await.map_err(|err| {
        warn!(table = state.name(), error = %err, "Commit failed after create");
        ApiError::CommitFailure {
            message: err.to_string(),
        }
    })?;

    debug!(table = state.name(), key = %change.key, "Record created");
    Ok((StatusCode::OK, Json(change)).into_response())
}
