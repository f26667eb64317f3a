#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use parcelo_server::handler::routes;
use parcelo_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
use parcelo_server::service::ServiceState;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "parcelo_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "parcelo_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "parcelo_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        if let Some(server_error) = error.downcast_ref::<server::ServerError>() {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %server_error,
                code = server_error.error_code(),
                recoverable = server_error.is_recoverable(),
                suggestion = server_error.suggestion(),
                "application terminated with error"
            );
        } else {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                "application terminated with error"
            );
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.validate()?;
    cli.log();

    let state = create_service_state(&cli.service).await?;
    let router = create_router(state, &cli.recovery);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the service state from configuration.
async fn create_service_state(
    config: &parcelo_server::service::ServiceConfig,
) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config)
        .await
        .context("failed to create service state")
}

/// Creates the router with all middleware layers applied.
///
/// Recovery is the outermost layer so panics and timeouts anywhere in the
/// stack still produce a well-formed error response.
fn create_router(state: ServiceState, recovery: &RecoveryConfig) -> Router {
    routes(state).with_observability().with_recovery(recovery)
}
