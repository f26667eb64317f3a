use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::AuthState;
use crate::handler::ErrorKind;

/// Requires the authenticated account to have the administrator role.
///
/// The effective role comes from [`AuthState`], which re-reads it from the
/// database on every request. A token issued while the account was an
/// administrator stops granting access as soon as the stored role changes.
///
/// Authenticated accounts without the administrator role receive a
/// 403 Forbidden response.
///
/// #### Notes
///
/// - [`AuthState`] can't be extracted from requests without a *verified*
///   `Authorization` token.
/// - See [`require_authentication`](super::require_authentication) for more
///   information.
pub async fn require_admin(auth_state: AuthState, request: Request, next: Next) -> Response {
    if !auth_state.is_admin() {
        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            user_id = %auth_state.user_id(),
            role = %auth_state.role(),
            "administrator access denied"
        );
        return ErrorKind::Forbidden
            .with_message("Administrator privileges required")
            .into_response();
    }

    next.run(request).await
}
