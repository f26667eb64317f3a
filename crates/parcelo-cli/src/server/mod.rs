//! HTTP server startup with lifecycle management.
//!
//! Binds the listener, serves the router and coordinates graceful shutdown
//! when a termination signal arrives.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult as Result};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "parcelo_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "parcelo_cli::server::shutdown";

/// Starts the HTTP server and runs it until shutdown.
///
/// # Arguments
///
/// * `app` - The Axum router to serve
/// * `config` - Server configuration with binding and shutdown settings
///
/// # Errors
///
/// Returns an error if:
/// - The server configuration is invalid
/// - The listener cannot bind to the specified address/port
/// - The server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
