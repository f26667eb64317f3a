//! Enhanced HTTP request extractors with improved error handling and validation.
//!
//! This module provides custom Axum extractors that enhance the default
//! functionality with better error messages, validation, and type safety.
//! All extractors are drop-in replacements for their standard Axum
//! counterparts.
//!
//! # Extractor Categories
//!
//! ## Authentication & Authorization
//!
//! - [`AuthClaims`] - JWT claims with application-specific fields
//! - [`AuthState`] - Complete authentication state with database verification
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - Enhanced JSON deserialization with better error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - Path parameter extraction with detailed error context
//! - [`Query`] - Query parameter extraction with enhanced error messages

// Authentication and Authorization
pub mod auth;

// Request Data Extraction
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthState};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
