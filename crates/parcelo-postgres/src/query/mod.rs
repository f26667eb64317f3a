//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations for all entities, encapsulating common patterns
//! and providing type-safe interfaces.
//!
//! Repositories are stateless unit structs whose methods take an open
//! connection as their first argument.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`] struct
//! to provide consistent, bounded pagination across the system.

pub mod location;
pub mod parcel;
pub mod user;

pub use location::LocationRepository;
pub use parcel::ParcelRepository;
pub use user::UserRepository;

pub use crate::types::Pagination;
