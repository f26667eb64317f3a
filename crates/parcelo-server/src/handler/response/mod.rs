//! Response payload types returned by the handlers.

mod authentication;
mod error_response;
mod location;
mod monitor;
mod parcel;
mod user;

pub use authentication::{LoginResponse, RegisterResponse};
pub(crate) use error_response::ErrorResponse;
pub use location::LocationResponse;
pub use monitor::HealthResponse;
pub use parcel::{DeleteParcelResponse, ParcelResponse};
pub use user::{DeleteUserResponse, UserResponse};
