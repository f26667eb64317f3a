//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;
mod pagination;

pub use constraints::{
    ConstraintCategory, ConstraintViolation, LocationConstraints, ParcelConstraints,
    UserConstraints,
};
pub use enums::{ParcelStatus, UserRole};
pub use pagination::{MAX_LIMIT, Pagination};
