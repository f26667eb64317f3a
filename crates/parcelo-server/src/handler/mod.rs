//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes are grouped into three tiers:
//!
//! - public routes (registration, login, health) require no credentials,
//! - private routes require a verified `Authorization` token,
//! - admin routes additionally require the administrator role, re-read from
//!   the database on every request.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use parcelo_server::handler::routes;
//! use parcelo_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! let router = routes(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod locations;
mod monitors;
mod parcels;
pub mod request;
mod response;
mod statuses;
mod users;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::{require_admin, require_authentication};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes requiring authentication.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    Router::new()
        .merge(authentication::private_routes())
        .merge(parcels::routes())
        .merge(locations::routes())
        .merge(statuses::routes())
        .route_layer(require_authentication)
}

/// Returns a [`Router`] with all routes requiring the administrator role.
fn admin_routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state.clone(), require_authentication);
    let require_admin = from_fn_with_state(state, require_admin);

    Router::new()
        .merge(parcels::admin_routes())
        .merge(users::admin_routes())
        .route_layer(require_admin)
        .route_layer(require_authentication)
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(private_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(public_routes())
        .fallback(handler)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use super::handler;

    #[tokio::test]
    async fn unknown_routes_answer_not_found() -> anyhow::Result<()> {
        let router = Router::new().fallback(handler);
        let server = TestServer::new(router)?;

        let response = server.get("/no/such/route").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "not_found");

        Ok(())
    }
}
