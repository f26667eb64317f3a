//! Postgres-backed enumerations shared across the data layer.

mod parcel_status;
mod user_role;

pub use parcel_status::ParcelStatus;
pub use user_role::UserRole;
