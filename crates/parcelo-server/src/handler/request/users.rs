//! User administration request types.

use parcelo_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload to change the role of an account.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    /// Account whose role is being changed.
    pub user_id: Uuid,

    /// Role to assign.
    pub role: UserRole,
}

/// Query parameters for listing accounts.
///
/// Pagination is extracted separately via [`PaginationRequest`].
///
/// [`PaginationRequest`]: super::PaginationRequest
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    /// Restricts results to accounts holding this role.
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_role_deserializes_role_names() {
        let request: AssignRoleRequest = serde_json::from_str(
            r#"{"userId":"018f3a9e-0000-7000-8000-000000000000","role":"courier"}"#,
        )
        .unwrap();
        assert_eq!(request.role, UserRole::Courier);
    }

    #[test]
    fn list_params_deserialize_role_filter() {
        let params: ListUsersParams = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(params.role, Some(UserRole::Admin));
    }
}
