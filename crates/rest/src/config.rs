//! Server configuration for the REST surface.
//!
//! This module provides the configuration type for the server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SHELF_PORT` | 8080 | Server port |
//! | `SHELF_HOST` | 127.0.0.1 | Host to bind |
//! | `SHELF_LOG_LEVEL` | info | Log level |
//! | `SHELF_MAX_BODY_SIZE` | 10485760 | Max request body (bytes) |
//! | `SHELF_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `SHELF_ENABLE_CORS` | true | Enable CORS |
//! | `SHELF_CORS_ORIGINS` | * | Allowed origins |
//! | `SHELF_DEFAULT_PAGE_SIZE` | 10 | Records per page for plain listings |
//!
//! # Example
//!
//! ```rust
//! use shelf_rest::ApiConfig;
//!
//! // Create from environment
//! let config = ApiConfig::from_env();
//!
//! // Or create programmatically
//! let config = ApiConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Configuration for the REST surface.
///
/// This struct can be constructed from environment variables using
/// [`ApiConfig::from_env`], from command line arguments using clap's
/// `Parser::parse`, or programmatically.
#[derive(Debug, Clone, Parser)]
pub struct ApiConfig {
    /// Port to listen on.
    #[arg(short, long, env = "SHELF_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "SHELF_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SHELF_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "SHELF_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "SHELF_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "SHELF_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "SHELF_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Records per page for listings that carry no page token.
    #[arg(long, env = "SHELF_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 10 * 1024 * 1024,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            default_page_size: 10,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address string to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }
        if self.host.is_empty() {
            errors.push("Host cannot be empty".to_string());
        }
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "Invalid log level: {} (expected one of error, warn, info, debug, trace)",
                self.log_level
            ));
        }
        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }
        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }
        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for tests: ephemeral port, short
    /// timeout, no CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            request_timeout: 5,
            enable_cors: false,
            ..Default::default()
        }
    }
}
