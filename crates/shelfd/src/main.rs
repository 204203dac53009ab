//! Shelf server.
//!
//! Serves snapshot-backed record tables over a generated REST surface.
//! Ships with a sample books table, JSON seeding, and an optional
//! bearer-token guard on mutating routes.

mod books;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use tracing::info;

use shelf_rest::{create_api, create_api_with_guard, init_logging, ApiConfig, Catalog};
use shelf_store::{MemoryTable, Table};

use books::Book;

/// Command-line and environment configuration for the shelf server.
#[derive(Debug, Clone, Parser)]
#[command(name = "shelfd")]
#[command(about = "REST access to snapshot-backed record tables")]
struct Config {
    /// REST surface options.
    #[command(flatten)]
    api: ApiConfig,

    /// Directory holding table snapshots. Tables stay in memory when unset.
    #[arg(long, env = "SHELF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON array of books loaded into the books table when it is empty.
    #[arg(long, env = "SHELF_SEED_FILE")]
    seed: Option<PathBuf>,

    /// Bearer token required on mutating routes. Unset leaves them open.
    #[arg(long, env = "SHELF_AUTH_TOKEN")]
    auth_token: Option<String>,
}

/// Opens the books table, snapshot-backed when a data directory is
/// configured, and seeds it when a seed file is given.
async fn open_books_table(config: &Config) -> anyhow::Result<MemoryTable<Book>> {
    let books = match &config.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join("books.json");
            info!(snapshot = %path.display(), "Opening books table");
            MemoryTable::<Book>::open("books", &path)?
        }
        None => {
            info!("Opening ephemeral books table");
            MemoryTable::<Book>::ephemeral("books")
        }
    };

    if let Some(seed) = &config.seed {
        let bytes = std::fs::read(seed)?;
        let seeded = books.seed_json(&bytes)?;
        info!(file = %seed.display(), records = seeded, "Seeded books table");
        books.commit().await?;
    }

    Ok(books)
}

/// Builds the router, composing the bearer-token guard onto mutating
/// routes when a token is configured.
fn build_app(catalog: Catalog, api: ApiConfig, auth_token: Option<String>) -> Router {
    match auth_token {
        Some(token) => {
            let expected = format!("Bearer {token}");
            let guard = axum::middleware::from_fn(
                move |request: axum::extract::Request, next: axum::middleware::Next| {
                    let expected = expected.clone();
                    async move {
                        let presented = request
                            .headers()
                            .get(header::AUTHORIZATION)
                            .and_then(|value| value.to_str().ok());
                        if presented == Some(expected.as_str()) {
                            next.run(request).await
                        } else {
                            (
                                StatusCode::UNAUTHORIZED,
                                Json(json!({
                                    "error": {
                                        "kind": "unauthorized",
                                        "message": "This route requires a bearer token",
                                    }
                                })),
                            )
                                .into_response()
                        }
                    }
                },
            );
            create_api_with_guard(catalog, api, guard)
        }
        None => create_api(catalog, api),
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: Router, config: &Config) -> anyhow::Result<()> {
    let addr = config.api.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.api.log_level);

    if let Err(errors) = config.api.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let books = Arc::new(open_books_table(&config).await?);

    let mut catalog = Catalog::default();
    catalog.register(books as Arc<dyn Table>)?;

    info!(
        port = config.api.port,
        host = %config.api.host,
        tables = catalog.len(),
        "Starting shelf server"
    );

    let app = build_app(catalog, config.api.clone(), config.auth_token.clone());
    serve(app, &config).await
}
