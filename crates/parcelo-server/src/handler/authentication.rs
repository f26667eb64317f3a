//! Authentication handlers for user registration, login and profile access.
//!
//! Login keeps its timing uniform: when no account matches the submitted
//! email address, a dummy password verification runs anyway so the response
//! time does not reveal whether the address is registered.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use parcelo_postgres::PgClient;
use parcelo_postgres::model::NewUser;
use parcelo_postgres::query::UserRepository;

use super::request::{LoginRequest, RegisterRequest};
use super::response::{LoginResponse, RegisterResponse, UserResponse};
use crate::extract::{AuthClaims, AuthState, Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthHasher, AuthKeys, ServiceState};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "parcelo_server::handler::authentication";

/// Registers a new user account.
#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    ValidateJson(request): ValidateJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let email_address = request.email_address.to_lowercase();

    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "registering new user"
    );

    if UserRepository::email_exists(&mut conn, &email_address).await? {
        tracing::warn!(
            target: TRACING_TARGET,
            "registration rejected (email already in use)"
        );
        return Err(ErrorKind::Conflict
            .with_resource("user")
            .with_message("Email address is already registered"));
    }

    if UserRepository::username_exists(&mut conn, &request.username).await? {
        tracing::warn!(
            target: TRACING_TARGET,
            username = %request.username,
            "registration rejected (username already in use)"
        );
        return Err(ErrorKind::Conflict
            .with_resource("user")
            .with_message("Username is already taken"));
    }

    let password_hash = auth_hasher.hash_password(&request.password)?;
    let new_user = NewUser {
        username: request.username,
        email_address,
        password_hash,
        role: None,
    };

    // The unique constraints still back the pre-checks above; a concurrent
    // duplicate insert surfaces as a 409 through the constraint mapping.
    let user = UserRepository::create_user(&mut conn, new_user).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        username = %user.username,
        "user registered"
    );

    let response = RegisterResponse {
        user_id: user.id,
        username: user.username,
        email_address: user.email_address,
        role: user.role,
        created_at: user.created_at.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticates a user and issues a signed access token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(auth_keys): State<AuthKeys>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let email_address = request.email_address.to_lowercase();

    let user = UserRepository::find_user_by_email(&mut conn, &email_address).await?;
    let Some(user) = user.filter(|user| user.is_active()) else {
        // No matching account (or a deactivated one): burn comparable time.
        let _ = auth_hasher.verify_dummy_password(&request.password);
        tracing::warn!(
            target: TRACING_TARGET,
            "login rejected (unknown or deactivated account)"
        );
        return Err(ErrorKind::Unauthorized
            .with_resource("authentication")
            .with_message("Invalid credentials"));
    };

    auth_hasher.verify_password(&request.password, &user.password_hash)?;

    let auth_claims = AuthClaims::new(&user, auth_keys.token_ttl());
    let issued_at = auth_claims.issued_at;
    let expires_at = auth_claims.expires_at;
    let access_token = auth_claims.into_token(auth_keys.encoding_key())?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "user logged in"
    );

    let response = LoginResponse {
        user_id: user.id,
        access_token,
        issued_at,
        expires_at,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Retrieves the authenticated user's own profile.
#[tracing::instrument(skip_all)]
async fn get_own_profile(
    State(pg_client): State<PgClient>,
    auth_state: AuthState,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let user = UserRepository::find_user_by_id(&mut conn, auth_state.user_id()).await?;
    let Some(user) = user.filter(|user| user.is_active()) else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found"));
    };

    Ok((StatusCode::OK, Json(UserResponse::new(user))))
}

/// Returns a [`Router`] with all public authentication routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Returns a [`Router`] with all authenticated profile routes.
pub fn private_routes() -> Router<ServiceState> {
    Router::new().route("/auth/profile", get(get_own_profile))
}
