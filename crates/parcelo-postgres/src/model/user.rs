//! User account model for PostgreSQL database operations.
//!
//! ## Models
//!
//! - [`User`] - Main user model with credentials and role information
//! - [`NewUser`] - Data structure for creating new users
//! - [`UpdateUser`] - Data structure for updating existing users

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;
use crate::types::UserRole;

/// Main user model representing an account in the system.
///
/// The password hash is intentionally kept out of any serialized
/// representation: this type derives no serde traits, and API-facing
/// response types are built from selected fields instead.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Human-readable login name (unique, case-insensitive).
    pub username: String,
    /// Primary email for authentication (unique, case-insensitive).
    pub email_address: String,
    /// Securely hashed password (Argon2id PHC string).
    pub password_hash: String,
    /// Authorization role assigned to this user.
    pub role: UserRole,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
    /// Timestamp when the user was soft-deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Human-readable login name.
    pub username: String,
    /// Primary email for authentication.
    pub email_address: String,
    /// Securely hashed password.
    pub password_hash: String,
    /// Authorization role, defaults to [`UserRole::User`] when `None`.
    pub role: Option<UserRole>,
}

/// Data for updating a user.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    /// Human-readable login name.
    pub username: Option<String>,
    /// Primary email for authentication.
    pub email_address: Option<String>,
    /// Securely hashed password.
    pub password_hash: Option<String>,
    /// Authorization role.
    pub role: Option<UserRole>,
}

impl User {
    /// Returns whether the user has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns whether the user is active and can be used.
    pub fn is_active(&self) -> bool {
        !self.is_deleted()
    }

    /// Returns whether the user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the user can perform admin actions.
    ///
    /// Deleted accounts lose their privileges even if the role column still
    /// says admin.
    pub fn can_admin(&self) -> bool {
        self.is_active() && self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole, deleted: bool) -> User {
        let now = jiff::Timestamp::now();
        User {
            id: Uuid::new_v4(),
            username: "amina".to_owned(),
            email_address: "amina@example.com".to_owned(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$...".to_owned(),
            role,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: deleted.then(|| now.into()),
        }
    }

    #[test]
    fn deleted_admin_loses_privileges() {
        let admin = sample_user(UserRole::Admin, false);
        assert!(admin.can_admin());

        let deleted_admin = sample_user(UserRole::Admin, true);
        assert!(deleted_admin.is_admin());
        assert!(!deleted_admin.can_admin());
    }

    #[test]
    fn regular_user_is_not_admin() {
        let user = sample_user(UserRole::User, false);
        assert!(user.is_active());
        assert!(!user.can_admin());
    }
}
