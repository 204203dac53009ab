//! Search handler.
//!
//! Serves `GET /search/<table>/<page>/<token>`: a filtered, paged scan.
//! The page segment uses the compact scheme from [`crate::pagination`] and
//! never fails; the token segment is URL-safe base64 around a JSON template
//! record, where every populated field must match.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::pagination::PageRequest;
use crate::search_token;
use crate::state::ResourceState;

/// Handler for the search interaction.
///
/// # HTTP Request
///
/// `GET /search/<table>/<page>/<token>`
///
/// # Response
///
/// - `200 OK` - A record page of matches
/// - `400 Bad Request` - The token is not valid URL-safe base64
/// - `500 Internal Server Error` - The decoded template does not fit the
///   table's record type
///
/// # Example
///
/// ```http
/// GET /search/books/B25/eyJhdXRob3IiOiJIZXJiZXJ0In0 HTTP/1.1
/// Host: shelf.example.com
/// ```
pub async fn search_handler(
    State(state): State<ResourceState>,
    Path((page_token, token)): Path<(String, String)>,
) -> ApiResult<Response> {
    let request = PageRequest::decode(&page_token);
    debug!(
        table = state.name(),
        page = request.page,
        size = request.size,
        "Processing search request"
    );

    // Base64 failure is a client error; a template that fails typed
    // decoding past that point is a server error.
    let template = search_token::decode(&token).map_err(|_| ApiError::MalformedSearchToken {
        token: token.clone(),
    })?;
    let filter = state.table().decode_filter(&template)?;

    let page = state.table().find(request.page, request.size, filter).await?;

    debug!(
        table = state.name(),
        total = page.total,
        count = page.len(),
        "Search complete"
    );
    Ok((StatusCode::OK, Json(page)).into_response())
}
