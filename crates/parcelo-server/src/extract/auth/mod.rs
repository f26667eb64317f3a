//! Authentication and authorization extractors.
//!
//! This module provides JWT token handling and verified authentication state
//! for request handlers.
//!
//! # Key Types
//!
//! - [`AuthClaims`] - JWT claims structure with token encoding and validation
//! - [`AuthState`] - Authenticated user state with database verification

mod auth_state;
mod jwt_claims;

pub use self::auth_state::AuthState;
pub use self::jwt_claims::AuthClaims;
