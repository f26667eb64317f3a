//! User response types.
//!
//! The password hash never leaves the database layer: none of these
//! representations carry it.

use jiff::Timestamp;
use parcelo_postgres::model::User;
use parcelo_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned when retrieving a user.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique identifier of the user.
    pub user_id: Uuid,

    /// Username of the user.
    pub username: String,
    /// Email address associated with the user.
    pub email_address: String,
    /// Role assigned to the user.
    pub role: UserRole,

    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

impl UserResponse {
    /// Creates a new instance of [`UserResponse`].
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email_address: user.email_address,
            role: user.role,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}

/// Response returned after soft-deleting a user.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    /// Unique identifier of the deleted user.
    pub user_id: Uuid,

    /// Timestamp when the user was originally created.
    pub created_at: Timestamp,
    /// Timestamp when the user was deleted.
    pub deleted_at: Option<Timestamp>,
}

impl DeleteUserResponse {
    /// Creates a new instance of [`DeleteUserResponse`].
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            created_at: user.created_at.into(),
            deleted_at: user.deleted_at.map(Into::into),
        }
    }
}

impl From<User> for DeleteUserResponse {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_never_carries_password_hash() {
        let response = UserResponse {
            user_id: Uuid::new_v4(),
            username: "alice".to_owned(),
            email_address: "alice@example.com".to_owned(),
            role: UserRole::User,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
