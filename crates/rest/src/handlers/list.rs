//! List handler.
//!
//! Serves `GET /<table>`: the first page of the table with the configured
//! default page size. Callers that need other pages or filtering use the
//! search route instead.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_store::Filter;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::ResourceState;

/// Handler for the list interaction.
///
/// # HTTP Request
///
/// `GET /<table>`
///
/// # Response
///
/// - `200 OK` - A record page with the first page of the table
pub async fn list_handler(State(state): State<ResourceState>) -> ApiResult<Response> {
    debug!(table = state.name(), "Processing list request");

    let page = state
        .table()
        .find(1, state.default_page_size(), Filter::Everything)
        .await?;

    debug!(table = state.name(), count = page.len(), "List complete");
    Ok((StatusCode::OK, Json(page)).into_response())
}
