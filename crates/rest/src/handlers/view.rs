//! View handler.
//!
//! Serves `GET /<table>/<key>`: a single record looked up by key.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_store::RecordKey;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::ResourceState;

/// Handler for the view interaction.
///
/// # HTTP Request
///
/// `GET /<table>/<key>`
///
/// # Response
///
/// - `200 OK` - The record, wrapped with its key
/// - `400 Bad Request` - The key is not a valid record key
/// - `404 Not Found` - No record exists under the key
pub async fn view_handler(
    State(state): State<ResourceState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let key: RecordKey = key.parse()?;
    debug!(table = state.name(), key = %key, "Processing view request");

    let stored = state.table().find_by_key(&key).await?;

    debug!(table = state.name(), key = %key, "Record found");
    Ok((StatusCode::OK, Json(stored)).into_response())
}
