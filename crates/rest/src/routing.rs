//! Route construction for registered tables.
//!
//! Every table in the catalog gets the same six routes:
//!
//! - `GET /<table>` - First page of records
//! - `GET /<table>/{key}` - Single record by key
//! - `GET /search/<table>/{page}/{token}` - Filtered page
//! - `POST /<table>` - Create a record
//! - `PUT /<table>/{key}` - Merge fields into a record
//! - `DELETE /<table>/{key}` - Delete a record
//!
//! The three mutating routes are wrapped with the caller's guard layer via
//! `route_layer`, so the guard runs only when a mutating route actually
//! matches. Read routes never pass through it.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    response::IntoResponse,
    routing::{Route, get, post, put},
};
use tower::{Layer, Service};

use crate::catalog::Catalog;
use crate::config::ApiConfig;
use crate::handlers;
use crate::state::ResourceState;

/// Builds the router for every table in `catalog`, wrapping mutating routes
/// with `guard`.
///
/// The trait bounds mirror what `Router::route_layer` accepts, so anything
/// usable as axum middleware works as a guard, `axum::middleware::from_fn`
/// closures included.
pub fn create_routes<G>(catalog: &Catalog, config: Arc<ApiConfig>, guard: G) -> Router
where
    G: Layer<Route> + Clone + Send + Sync + 'static,
    G::Service: Service<Request> + Clone + Send + Sync + 'static,
    <G::Service as Service<Request>>::Response: IntoResponse + 'static,
    <G::Service as Service<Request>>::Error: Into<Infallible> + 'static,
    <G::Service as Service<Request>>::Future: Send + 'static,
{
    let mut router = Router::new();
    for (name, table) in catalog.iter() {
        let state = ResourceState::new(Arc::clone(table), Arc::clone(&config));
        router = router.merge(table_routes(name, state, guard.clone()));
    }
    router
}

/// Builds the six routes for one table.
fn table_routes<G>(name: &str, state: ResourceState, guard: G) -> Router
where
    G: Layer<Route> + Clone + Send + Sync + 'static,
    G::Service: Service<Request> + Clone + Send + Sync + 'static,
    <G::Service as Service<Request>>::Response: IntoResponse + 'static,
    <G::Service as Service<Request>>::Error: Into<Infallible> + 'static,
    <G::Service as Service<Request>>::Future: Send + 'static,
{
    let open = Router::new()
        .route(&format!("/{name}"), get(handlers::list_handler))
        .route(&format!("/{name}/{{key}}"), get(handlers::view_handler))
        .route(
            &format!("/search/{name}/{{page}}/{{token}}"),
            get(handlers::search_handler),
        )
        .with_state(state.clone());

    let guarded = Router::new()
        .route(&format!("/{name}"), post(handlers::create_handler))
        .route(
            &format!("/{name}/{{key}}"),
            put(handlers::update_handler).delete(handlers::delete_handler),
        )
        .route_layer(guard)
        .with_state(state);

    open.merge(guarded)
}
