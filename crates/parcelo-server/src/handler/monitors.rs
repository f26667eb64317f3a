//! Liveness and readiness handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use jiff::Timestamp;
use parcelo_postgres::PgClient;

use super::response::HealthResponse;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "parcelo_server::handler::monitors";

/// Reports whether the service can reach its database pool.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<HealthResponse>)> {
    let is_healthy = match pg_client.get_connection().await {
        Ok(_connection) => true,
        Err(db_error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %db_error,
                "health check failed to reach the database"
            );
            false
        }
    };

    let pool = pg_client.pool_status();
    if pool.is_under_pressure() {
        tracing::warn!(
            target: TRACING_TARGET,
            utilization = pool.utilization(),
            waiting = pool.waiting,
            "connection pool is under pressure"
        );
    }

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        is_healthy,
        updated_at: Timestamp::now(),
    };
    Ok((status_code, Json(response)))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
