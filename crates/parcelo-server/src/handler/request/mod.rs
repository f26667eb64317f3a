//! Request payloads and query parameters for API endpoints.

mod authentication;
mod locations;
mod pagination;
mod parcels;
mod users;

pub use authentication::{LoginRequest, RegisterRequest};
pub use locations::CreateLocationRequest;
pub use pagination::PaginationRequest;
pub use parcels::{
    CreateParcelRequest, DeleteParcelParams, ListParcelsParams, UpdateParcelRequest,
    UpdateParcelStatusRequest,
};
pub use users::{AssignRoleRequest, ListUsersParams};
