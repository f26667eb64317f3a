//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Authentication and authorization
//! - Error handling (panics, timeouts, service errors)
//! - Request tracing and correlation IDs

mod auth;
mod observability;
mod recovery;

pub use auth::{require_admin, require_authentication};
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
