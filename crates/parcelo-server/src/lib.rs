#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, Result};

/// Tracing target for authentication operations.
pub const TRACING_TARGET_AUTHENTICATION: &str = "parcelo_server::authentication";

/// Tracing target for authorization decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "parcelo_server::authorization";
