//! Termination signal handling.

use std::time::Duration;

use super::TRACING_TARGET_SHUTDOWN;

/// Resolves when the process receives Ctrl+C (SIGINT).
async fn interrupt() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, signal = "SIGINT", "Shutdown requested");
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "Could not register the Ctrl+C handler"
            );
        }
    }
}

/// Resolves when the process receives SIGTERM.
#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, signal = "SIGTERM", "Shutdown requested");
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "Could not register the SIGTERM handler"
            );
        }
    }
}

/// On non-Unix platforms shutdown relies on Ctrl+C alone.
#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Waits for the first termination signal, then announces the drain window.
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    tokio::select! {
        () = interrupt() => {}
        () = terminate() => {}
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        drain_window_secs = shutdown_timeout.as_secs(),
        "Draining in-flight requests"
    );
}
