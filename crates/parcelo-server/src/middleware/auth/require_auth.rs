use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Requires a valid authentication token to proceed with the request.
///
/// #### Notes
///
/// - [`AuthState`] can't be extracted from requests without a *verified*
///   `Authorization` token, so failed extraction rejects the request with
///   the appropriate 401 response.
/// - The verified state is cached in request extensions, so handlers that
///   also extract [`AuthState`] do not repeat the database lookup.
///
/// #### Examples
///
/// ```rust,no_run
/// use axum::middleware::from_fn_with_state;
/// use parcelo_server::middleware::require_authentication;
/// use parcelo_server::service::{ServiceConfig, ServiceState};
///
/// # async fn demo() -> anyhow::Result<()> {
/// let state = ServiceState::from_config(&ServiceConfig::default()).await?;
/// let _guard = from_fn_with_state(state, require_authentication);
/// # Ok(())
/// # }
/// ```
pub async fn require_authentication(_: AuthState, request: Request, next: Next) -> Response {
    next.run(request).await
}
