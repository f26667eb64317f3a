//! User administration handlers.
//!
//! All routes in this module sit behind the admin middleware; the handlers
//! themselves only add the per-operation rules (self-deletion guard,
//! unknown-user lookups).

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use parcelo_postgres::PgClient;
use parcelo_postgres::query::UserRepository;

use super::request::{AssignRoleRequest, ListUsersParams, PaginationRequest};
use super::response::{DeleteUserResponse, UserResponse};
use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for user administration operations.
const TRACING_TARGET: &str = "parcelo_server::handler::users";

/// Lists users, optionally filtered by role.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(pg_client): State<PgClient>,
    Query(params): Query<ListUsersParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>)> {
    let mut conn = pg_client.get_connection().await?;
    let pagination = pagination.into();

    let users = match params.role {
        Some(role) => UserRepository::list_users_by_role(&mut conn, role, pagination).await?,
        None => UserRepository::list_users(&mut conn, pagination).await?,
    };

    let response = users.into_iter().map(UserResponse::new).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// Assigns a new role to a user.
#[tracing::instrument(skip_all)]
async fn assign_role(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<AssignRoleRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let user = UserRepository::find_user_by_id(&mut conn, request.user_id).await?;
    let Some(user) = user.filter(|user| user.is_active()) else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {}", request.user_id)));
    };

    let user = UserRepository::assign_role(&mut conn, user.id, request.role).await?;

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %auth_state.user_id(),
        user_id = %user.id,
        role = %user.role,
        "role assigned"
    );

    Ok((StatusCode::OK, Json(UserResponse::new(user))))
}

/// Soft-deletes a user account.
///
/// An administrator cannot delete their own account, otherwise the last
/// admin could lock everyone out.
#[tracing::instrument(skip_all)]
async fn delete_user(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
    Path(user_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<DeleteUserResponse>)> {
    if user_id == auth_state.user_id() {
        tracing::warn!(
            target: TRACING_TARGET,
            admin_id = %auth_state.user_id(),
            "self-deletion attempt rejected"
        );
        return Err(ErrorKind::Conflict
            .with_resource("user")
            .with_message("Administrators cannot delete their own account"));
    }

    let mut conn = pg_client.get_connection().await?;

    let deleted = UserRepository::delete_user(&mut conn, user_id).await?;
    let Some(deleted) = deleted else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {user_id}")));
    };

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %auth_state.user_id(),
        user_id = %deleted.id,
        "user deleted"
    );

    Ok((StatusCode::OK, Json(DeleteUserResponse::new(deleted))))
}

/// Returns a [`Router`] with all admin-gated user routes.
pub fn admin_routes() -> Router<ServiceState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/assign-role", post(assign_role))
        .route("/users/{user_id}", delete(delete_user))
}
