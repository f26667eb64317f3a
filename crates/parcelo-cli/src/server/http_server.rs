//! HTTP listener setup and request serving.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::{
    Result, ServerError, TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP, shutdown_signal,
};

/// Binds the configured address and serves requests until shutdown.
///
/// The configuration is validated before the listener is opened, so a bad
/// host or port fails fast instead of surfacing as a bind error.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %validation_error,
            "Server configuration rejected"
        );

        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = server_config.server_addr();
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        shutdown_timeout_secs = server_config.shutdown_timeout,
        development_mode = server_config.is_development(),
        "Starting HTTP server"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "Listening on all interfaces; verify firewall rules"
        );
    }

    let listener = TcpListener::bind(server_addr).await.map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            addr = %server_addr,
            error = %error,
            "Could not bind the listener"
        );

        ServerError::Bind {
            address: server_addr.to_string(),
            source: error,
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        "Accepting connections"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(server_config.shutdown_timeout()))
    .await
    .map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "Server loop ended with an error"
        );
        ServerError::Runtime(error)
    })?;

    tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Server stopped cleanly");
    Ok(())
}
