//! Parcel handlers covering the full delivery order lifecycle.
//!
//! Every read and write is scoped to the caller: owners operate on their own
//! parcels, administrators on all of them. Status transitions are reserved
//! for administrators and validated against the lifecycle state machine.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use parcelo_postgres::PgClient;
use parcelo_postgres::model::{NewParcel, Parcel, UpdateParcel};
use parcelo_postgres::query::{LocationRepository, ParcelRepository};

use super::request::{
    CreateParcelRequest, DeleteParcelParams, ListParcelsParams, PaginationRequest,
    UpdateParcelRequest, UpdateParcelStatusRequest,
};
use super::response::{DeleteParcelResponse, ParcelResponse};
use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for parcel operations.
const TRACING_TARGET: &str = "parcelo_server::handler::parcels";

/// Loads a parcel and enforces the ownership-or-admin access rule.
///
/// Soft-deleted parcels are indistinguishable from missing ones.
async fn load_scoped_parcel(
    pg_client: &PgClient,
    auth_state: &AuthState,
    parcel_id: uuid::Uuid,
) -> Result<Parcel> {
    let mut conn = pg_client.get_connection().await?;

    let parcel = ParcelRepository::find_parcel_by_id(&mut conn, parcel_id).await?;
    let Some(parcel) = parcel.filter(|parcel| !parcel.is_deleted()) else {
        return Err(not_found(parcel_id));
    };

    if !parcel.is_owned_by(auth_state.user_id()) && !auth_state.is_admin() {
        tracing::warn!(
            target: TRACING_TARGET,
            user_id = %auth_state.user_id(),
            parcel_id = %parcel_id,
            "access to another user's parcel denied"
        );
        return Err(ErrorKind::Forbidden
            .with_resource("parcel")
            .with_message("You do not have access to this parcel"));
    }

    Ok(parcel)
}

fn not_found(parcel_id: uuid::Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_resource("parcel")
        .with_message("Parcel not found")
        .with_context(format!("Parcel ID: {parcel_id}"))
}

/// Registers a new parcel owned by the caller.
#[tracing::instrument(skip_all)]
async fn create_parcel(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateParcelRequest>,
) -> Result<(StatusCode, Json<ParcelResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let new_parcel = NewParcel {
        owner_id: auth_state.user_id(),
        description: request.description,
        weight_kg: request.weight_kg,
        pickup_address: request.pickup_address,
        destination_address: request.destination_address,
        current_location_id: None,
    };
    let parcel = ParcelRepository::create_parcel(&mut conn, new_parcel).await?;

    tracing::info!(
        target: TRACING_TARGET,
        parcel_id = %parcel.id,
        owner_id = %parcel.owner_id,
        "parcel registered"
    );

    Ok((StatusCode::CREATED, Json(ParcelResponse::new(parcel))))
}

/// Lists parcels visible to the caller.
///
/// Owners see their own parcels, administrators see everyone's. Both views
/// exclude soft-deleted records and accept an optional status filter.
#[tracing::instrument(skip_all)]
async fn list_parcels(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    Query(params): Query<ListParcelsParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<(StatusCode, Json<Vec<ParcelResponse>>)> {
    let mut conn = pg_client.get_connection().await?;
    let pagination = pagination.into();

    let parcels = if auth_state.is_admin() {
        ParcelRepository::list_all_parcels(&mut conn, params.status, pagination).await?
    } else {
        ParcelRepository::list_parcels_by_owner(
            &mut conn,
            auth_state.user_id(),
            params.status,
            pagination,
        )
        .await?
    };

    let response = parcels.into_iter().map(ParcelResponse::new).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// Retrieves a single parcel.
#[tracing::instrument(skip_all)]
async fn get_parcel(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    Path(parcel_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<ParcelResponse>)> {
    let parcel = load_scoped_parcel(&pg_client, &auth_state, parcel_id).await?;
    Ok((StatusCode::OK, Json(ParcelResponse::new(parcel))))
}

/// Partially updates a parcel's descriptive fields.
///
/// Status and location never change through this endpoint; those belong to
/// the admin-gated status route.
#[tracing::instrument(skip_all)]
async fn update_parcel(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    Path(parcel_id): Path<uuid::Uuid>,
    ValidateJson(request): ValidateJson<UpdateParcelRequest>,
) -> Result<(StatusCode, Json<ParcelResponse>)> {
    if request.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_resource("parcel")
            .with_message("At least one field must be provided"));
    }

    let parcel = load_scoped_parcel(&pg_client, &auth_state, parcel_id).await?;
    if !parcel.is_mutable() {
        tracing::warn!(
            target: TRACING_TARGET,
            parcel_id = %parcel_id,
            status = %parcel.status,
            "edit of a finalized parcel rejected"
        );
        return Err(ErrorKind::Conflict
            .with_resource("parcel")
            .with_message("Parcel has reached a terminal status and can no longer be edited"));
    }

    let mut conn = pg_client.get_connection().await?;
    let parcel = ParcelRepository::update_parcel(&mut conn, parcel_id, request.into_model()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        parcel_id = %parcel.id,
        "parcel updated"
    );

    Ok((StatusCode::OK, Json(ParcelResponse::new(parcel))))
}

/// Deletes a parcel.
///
/// The default is a soft delete available to the owner and administrators.
/// Administrators may pass `?permanent=true` to remove the row entirely.
#[tracing::instrument(skip_all)]
async fn delete_parcel(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    Path(parcel_id): Path<uuid::Uuid>,
    Query(params): Query<DeleteParcelParams>,
) -> Result<(StatusCode, Json<DeleteParcelResponse>)> {
    let parcel = load_scoped_parcel(&pg_client, &auth_state, parcel_id).await?;
    let mut conn = pg_client.get_connection().await?;

    if params.is_permanent() {
        if !auth_state.is_admin() {
            return Err(ErrorKind::Forbidden
                .with_resource("parcel")
                .with_message("Only administrators may permanently delete parcels"));
        }

        ParcelRepository::hard_delete_parcel(&mut conn, parcel_id).await?;
        tracing::info!(
            target: TRACING_TARGET,
            parcel_id = %parcel_id,
            "parcel permanently deleted"
        );

        let response = DeleteParcelResponse {
            parcel_id: parcel.id,
            created_at: parcel.created_at.into(),
            deleted_at: Some(jiff::Timestamp::now()),
        };
        return Ok((StatusCode::OK, Json(response)));
    }

    let deleted = ParcelRepository::delete_parcel(&mut conn, parcel_id).await?;
    let Some(deleted) = deleted else {
        return Err(not_found(parcel_id));
    };

    tracing::info!(
        target: TRACING_TARGET,
        parcel_id = %deleted.id,
        "parcel deleted"
    );

    Ok((StatusCode::OK, Json(DeleteParcelResponse::new(deleted))))
}

/// Checks a requested tracking change against the parcel's current state.
///
/// A submitted status only counts as a transition when it differs from the
/// stored one; location-only scans (and same-status resubmissions) are
/// allowed as long as the parcel has not reached a terminal status.
fn validate_tracking_change(
    current: parcelo_postgres::types::ParcelStatus,
    requested: Option<parcelo_postgres::types::ParcelStatus>,
) -> Result<()> {
    match requested {
        Some(next) if next != current => {
            if !current.can_transition_to(next) {
                return Err(ErrorKind::Conflict
                    .with_resource("parcel")
                    .with_message("Requested status transition is not allowed")
                    .with_context(format!("{current} -> {next}")));
            }
        }
        _ => {
            if current.is_terminal() {
                return Err(ErrorKind::Conflict
                    .with_resource("parcel")
                    .with_message("Parcel has reached a terminal status and accepts no updates"));
            }
        }
    }

    Ok(())
}

/// Advances a parcel's lifecycle status and/or its location.
#[tracing::instrument(skip_all)]
async fn update_parcel_status(
    State(pg_client): State<PgClient>,
    Path(parcel_id): Path<uuid::Uuid>,
    ValidateJson(request): ValidateJson<UpdateParcelStatusRequest>,
) -> Result<(StatusCode, Json<ParcelResponse>)> {
    if request.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_resource("parcel")
            .with_message("At least one of status or currentLocationId must be provided"));
    }

    let mut conn = pg_client.get_connection().await?;

    let parcel = ParcelRepository::find_parcel_by_id(&mut conn, parcel_id).await?;
    let Some(parcel) = parcel.filter(|parcel| !parcel.is_deleted()) else {
        return Err(not_found(parcel_id));
    };

    if let Err(error) = validate_tracking_change(parcel.status, request.status) {
        tracing::warn!(
            target: TRACING_TARGET,
            parcel_id = %parcel_id,
            from = %parcel.status,
            to = ?request.status,
            "tracking update rejected"
        );
        return Err(error);
    }

    if let Some(location_id) = request.current_location_id {
        let location = LocationRepository::find_location_by_id(&mut conn, location_id).await?;
        if location.is_none() {
            return Err(ErrorKind::BadRequest
                .with_resource("parcel")
                .with_message("Referenced location does not exist")
                .with_context(format!("Location ID: {location_id}")));
        }
    }

    let changes = UpdateParcel {
        status: request.status,
        current_location_id: request.current_location_id,
        ..UpdateParcel::default()
    };
    let parcel = ParcelRepository::update_parcel(&mut conn, parcel_id, changes).await?;

    tracing::info!(
        target: TRACING_TARGET,
        parcel_id = %parcel.id,
        status = %parcel.status,
        "parcel status updated"
    );

    Ok((StatusCode::OK, Json(ParcelResponse::new(parcel))))
}

/// Returns a [`Router`] with all authenticated parcel routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/parcels", get(list_parcels).post(create_parcel))
        .route(
            "/parcels/{parcel_id}",
            get(get_parcel)
                .patch(update_parcel)
                .delete(delete_parcel),
        )
}

/// Returns a [`Router`] with the admin-gated parcel routes.
pub fn admin_routes() -> Router<ServiceState> {
    Router::new().route("/parcels/{parcel_id}/status", patch(update_parcel_status))
}

#[cfg(test)]
mod tests {
    use parcelo_postgres::types::ParcelStatus;

    use super::validate_tracking_change;
    use crate::handler::ErrorKind;

    #[test]
    fn location_only_update_is_allowed_while_active() {
        assert!(validate_tracking_change(ParcelStatus::InTransit, None).is_ok());
        assert!(validate_tracking_change(ParcelStatus::Pending, None).is_ok());
    }

    #[test]
    fn same_status_resubmission_is_not_a_transition() {
        let result =
            validate_tracking_change(ParcelStatus::InTransit, Some(ParcelStatus::InTransit));
        assert!(result.is_ok());
    }

    #[test]
    fn transition_out_of_terminal_status_is_rejected() {
        let error = validate_tracking_change(ParcelStatus::Delivered, Some(ParcelStatus::Pending))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn location_scan_on_terminal_parcel_is_rejected() {
        let error = validate_tracking_change(ParcelStatus::Cancelled, None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn valid_transition_is_accepted() {
        let result =
            validate_tracking_change(ParcelStatus::Pending, Some(ParcelStatus::InTransit));
        assert!(result.is_ok());
    }
}
