//! Authentication and authorization guards for route composition.

mod require_admin;
mod require_auth;

pub use require_admin::require_admin;
pub use require_auth::require_authentication;
