//! Application state and dependency injection.

mod auth;
mod config;

use parcelo_postgres::PgClient;

pub use crate::service::auth::{AuthHasher, AuthKeys};
pub use crate::service::config::ServiceConfig;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub auth_hasher: AuthHasher,
    pub auth_keys: AuthKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database, applies pending migrations, and derives the
    /// token signing keys from the configured secret.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            postgres: service_config.connect_postgres().await?,

            auth_hasher: AuthHasher::new(),
            auth_keys: service_config.load_auth_keys()?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(auth_hasher: AuthHasher);
impl_di!(auth_keys: AuthKeys);
