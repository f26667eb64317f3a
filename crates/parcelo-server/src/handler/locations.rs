//! Location handlers.
//!
//! Reading locations requires authentication; creating them is reserved for
//! administrators. The admin check runs inside the create handler because
//! `/locations` also carries the authenticated list route.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use parcelo_postgres::PgClient;
use parcelo_postgres::query::LocationRepository;

use super::request::{CreateLocationRequest, PaginationRequest};
use super::response::LocationResponse;
use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for location operations.
const TRACING_TARGET: &str = "parcelo_server::handler::locations";

/// Lists all known locations.
#[tracing::instrument(skip_all)]
async fn list_locations(
    State(pg_client): State<PgClient>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<(StatusCode, Json<Vec<LocationResponse>>)> {
    let mut conn = pg_client.get_connection().await?;

    let locations = LocationRepository::list_locations(&mut conn, pagination.into()).await?;

    let response = locations.into_iter().map(LocationResponse::new).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// Retrieves a single location.
#[tracing::instrument(skip_all)]
async fn get_location(
    State(pg_client): State<PgClient>,
    Path(location_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<LocationResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let location = LocationRepository::find_location_by_id(&mut conn, location_id).await?;
    let Some(location) = location else {
        return Err(ErrorKind::NotFound
            .with_resource("location")
            .with_message("Location not found")
            .with_context(format!("Location ID: {location_id}")));
    };

    Ok((StatusCode::OK, Json(LocationResponse::new(location))))
}

/// Creates a new location. Administrators only.
#[tracing::instrument(skip_all)]
async fn create_location(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>)> {
    if !auth_state.is_admin() {
        tracing::warn!(
            target: TRACING_TARGET,
            user_id = %auth_state.user_id(),
            role = %auth_state.role(),
            "location creation denied"
        );
        return Err(ErrorKind::Forbidden
            .with_resource("location")
            .with_message("Administrator privileges required"));
    }

    let mut conn = pg_client.get_connection().await?;

    // Duplicate display names surface as a 409 through the constraint mapping.
    let location = LocationRepository::create_location(&mut conn, request.into_model()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        location_id = %location.id,
        display_name = %location.display_name,
        "location created"
    );

    Ok((StatusCode::CREATED, Json(LocationResponse::new(location))))
}

/// Returns a [`Router`] with all authenticated location routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/{location_id}", get(get_location))
}
