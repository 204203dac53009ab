//! Generated REST surface for shelf record tables.
//!
//! This crate turns a [`Catalog`] of tables into an axum application. Every
//! registered table gets the same six routes, dispatched through the
//! object-safe [`shelf_store::Table`] trait, so adding a resource to a
//! server is one type definition and one `register` call.
//!
//! # Endpoints
//!
//! For a table registered as `books`:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/books` | First page of records |
//! | GET | `/books/{key}` | Single record by key |
//! | GET | `/search/books/{page}/{token}` | Filtered page |
//! | POST | `/books` | Create a record |
//! | PUT | `/books/{key}` | Merge fields into a record |
//! | DELETE | `/books/{key}` | Delete a record |
//!
//! The three mutating routes pass through the guard layer handed to
//! [`create_api_with_guard`]; read routes never do. [`create_api`] builds
//! the same surface with no guard.
//!
//! # Error Shape
//!
//! Failures render as JSON with a stable machine-readable kind:
//!
//! ```json
//! {"error": {"kind": "not_found", "message": "Record not found: books/x"}}
//! ```
//!
//! | Kind | Status |
//! |------|--------|
//! | `malformed_key`, `malformed_body`, `malformed_search_token`, `rejected` | 400 |
//! | `not_found` | 404 |
//! | `decode_failure`, `merge_failure`, `commit_failure`, `storage_failure` | 500 |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelf_rest::{ApiConfig, Catalog, create_api};
//! use shelf_store::MemoryTable;
//!
//! let mut catalog = Catalog::new();
//! catalog.register(Arc::new(MemoryTable::<Book>::ephemeral("books")))?;
//!
//! let app = create_api(catalog, ApiConfig::from_env());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Architecture
//!
//! - [`catalog`] - Table registration and name validation
//! - [`config`] - Server configuration with environment overrides
//! - [`routing`] - Per-table route construction and guard wiring
//! - [`handlers`] - One handler per route shape
//! - [`pagination`] - The compact page token scheme
//! - [`search_token`] - URL-safe base64 around JSON search templates
//! - [`state`] - Per-table handler state
//! - [`error`] - Error types and their HTTP rendering

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pagination;
pub mod routing;
pub mod search_token;
pub mod state;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use pagination::PageRequest;
pub use state::ResourceState;

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    response::IntoResponse,
    routing::Route,
};
use tower::{Layer, Service, ServiceBuilder, layer::util::Identity};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the axum application with every route open.
///
/// This is a convenience wrapper for servers that want no request guard.
/// For guarded mutations, use [`create_api_with_guard`].
///
/// # Example
///
/// ```rust,ignore
/// use shelf_rest::{ApiConfig, create_api};
///
/// let app = create_api(catalog, ApiConfig::from_env());
/// ```
pub fn create_api(catalog: Catalog, config: ApiConfig) -> Router {
    create_api_with_guard(catalog, config, Identity::new())
}

/// Creates the axum application, wrapping mutating routes with `guard`.
///
/// The guard is any layer `Router::route_layer` accepts, which includes
/// `axum::middleware::from_fn` closures and `tower::ServiceBuilder` chains.
/// It runs only when a POST, PUT, or DELETE route matches; GET routes stay
/// open.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{extract::Request, middleware::Next};
/// use shelf_rest::{ApiConfig, create_api_with_guard};
///
/// let guard = axum::middleware::from_fn(|request: Request, next: Next| async move {
///     // check credentials here
///     next.run(request).await
/// });
/// let app = create_api_with_guard(catalog, ApiConfig::from_env(), guard);
/// ```
pub fn create_api_with_guard<G>(catalog: Catalog, config: ApiConfig, guard: G) -> Router
where
    G: Layer<Route> + Clone + Send + Sync + 'static,
    G::Service: Service<Request> + Clone + Send + Sync + 'static,
    <G::Service as Service<Request>>::Response: IntoResponse + 'static,
    <G::Service as Service<Request>>::Error: Into<Infallible> + 'static,
    <G::Service as Service<Request>>::Future: Send + 'static,
{
    info!(tables = catalog.len(), "Creating REST surface");

    let config = Arc::new(config);
    let router = routing::create_routes(&catalog, Arc::clone(&config), guard);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config.cors_origins))
    } else {
        router
    };

    router
        .layer(service_builder)
        .layer(DefaultBodyLimit::max(config.max_body_size))
}

/// Builds the CORS layer from the configured origin list.
fn build_cors_layer(origins: &str) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. Honors `RUST_LOG`
/// when set, otherwise derives a filter from `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "shelf_rest={level},shelf_store={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
