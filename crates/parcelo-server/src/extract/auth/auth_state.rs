//! Authentication state extractor with database verification.
//!
//! This module provides [`AuthState`], an extractor that validates JWT tokens
//! and then verifies the claims against the current database state. Unlike
//! basic JWT validation, this extractor guarantees that the account still
//! exists, has not been soft-deleted, and carries its current role.
//!
//! # Verification Steps
//!
//! 1. **JWT Validation**: Cryptographic signature and claims verification
//! 2. **Account Verification**: Confirms the account exists and is active
//! 3. **Role Refresh**: The effective role is always re-read from the store,
//!    never taken from the token
//!
//! # Performance
//!
//! The verified state is cached in request extensions, so stacked extractors
//! and middleware within the same request trigger a single database query.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejection;
use derive_more::Deref;
use parcelo_postgres::PgClient;
use parcelo_postgres::query::UserRepository;
use parcelo_postgres::types::UserRole;
use uuid::Uuid;

use super::AuthClaims;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthKeys;

/// Authenticated user state with database verification.
///
/// [`AuthState`] is the primary authentication extractor. When extraction
/// succeeds the caller is guaranteed that:
///
/// - The request carried a cryptographically valid, unexpired JWT token
/// - The account referenced by the token exists and is not soft-deleted
/// - The [`role`] reflects the database at request time, not token issuance
///
/// Token claims are available through [`Deref`] to [`AuthClaims`].
///
/// [`role`]: Self::role
/// [`Deref`]: std::ops::Deref
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct AuthState {
    /// Validated token claims.
    #[deref]
    claims: AuthClaims,
    /// Effective role re-read from the database.
    role: UserRole,
}

impl AuthState {
    /// Returns the unique identifier of the authenticated user.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.claims.user_id
    }

    /// Returns the effective role of the authenticated user.
    ///
    /// This is the role currently stored in the database. It may differ from
    /// the role claim embedded in the token when the role changed after the
    /// token was issued.
    #[inline]
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns whether the authenticated user is an administrator.
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Verifies validated claims against the current database state.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::Unauthorized`]: account missing or soft-deleted
    /// * [`ErrorKind::InternalServerError`]: database connection or query failures
    pub async fn from_unverified_claims(auth_claims: AuthClaims, pg_client: &PgClient) -> Result<Self> {
        let mut conn = pg_client.get_connection().await.map_err(|db_error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %db_error,
                user_id = %auth_claims.user_id,
                token_id = %auth_claims.token_id,
                "Database connection failed during authentication verification"
            );
            ErrorKind::InternalServerError
                .with_message("Authentication verification is temporarily unavailable")
                .with_context("Unable to connect to authentication database")
        })?;

        let user = UserRepository::find_user_by_id(&mut conn, auth_claims.user_id)
            .await
            .map_err(|db_error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %db_error,
                    user_id = %auth_claims.user_id,
                    token_id = %auth_claims.token_id,
                    "Database error occurred during account validation query"
                );
                ErrorKind::InternalServerError
                    .with_message("Account verification encountered an error")
                    .with_context("Unable to validate account credentials")
            })?
            .ok_or_else(|| {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    user_id = %auth_claims.user_id,
                    token_id = %auth_claims.token_id,
                    "Authentication failed: account referenced in token no longer exists"
                );
                ErrorKind::Unauthorized
                    .with_message("Account not found")
                    .with_context("Your account may have been deactivated")
            })?;

        if user.is_deleted() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %auth_claims.user_id,
                token_id = %auth_claims.token_id,
                "Authentication failed: account has been deactivated"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Account has been deactivated")
                .with_context("Please contact support if you believe this is a mistake"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %auth_claims.user_id,
            role = %user.role,
            "Authentication verification completed successfully"
        );

        Ok(Self {
            claims: auth_claims,
            role: user.role,
        })
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    AuthKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Check for cached auth state to avoid repeated database queries
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header =
            <TypedHeader<Authorization<Bearer>> as FromRequestParts<S>>::from_request_parts(
                parts, state,
            )
            .await
            .map_err(reject_auth_header)?;

        let auth_keys = AuthKeys::from_ref(state);
        let auth_claims = AuthClaims::from_header(&auth_header, auth_keys.decoding_key())?;

        let pg_client = PgClient::from_ref(state);
        let auth_state = Self::from_unverified_claims(auth_claims, &pg_client).await?;

        // Cache the verified state for subsequent extractors in the same request
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

fn reject_auth_header(rejection: TypedHeaderRejection) -> Error<'static> {
    if rejection.is_missing() {
        ErrorKind::MissingAuthToken.into_error()
    } else {
        ErrorKind::MalformedAuthToken.into_error()
    }
}
