//! User repository for managing accounts.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewUser, UpdateUser, User};
use crate::types::UserRole;
use crate::{PgError, PgResult, schema};

/// Repository for user database operations.
///
/// Handles the account lifecycle: registration, credential lookup for
/// authentication, role management, and soft deletion. Soft-deleted users
/// are excluded from every lookup, so a deleted account behaves exactly
/// like a missing one.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    /// Creates a new user account.
    ///
    /// Username and email are normalized (trimmed, email lowercased) before
    /// insertion. Uniqueness is enforced by the database; a duplicate surfaces
    /// as a [`PgError`] carrying a constraint violation.
    pub async fn create_user(
        conn: &mut AsyncPgConnection,
        mut new_user: NewUser,
    ) -> PgResult<User> {
        use schema::users;

        new_user.username = new_user.username.trim().to_owned();
        new_user.email_address = new_user.email_address.trim().to_lowercase();

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a user by their unique identifier.
    ///
    /// Soft-deleted users are excluded.
    pub async fn find_user_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .filter(dsl::deleted_at.is_null())
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Finds a user by email address.
    ///
    /// Email comparison is case-insensitive. Used for authentication lookup.
    pub async fn find_user_by_email(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .filter(dsl::deleted_at.is_null())
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Updates a user with new information.
    ///
    /// Applies partial updates: only fields set to `Some(value)` are modified,
    /// and `updated_at` is advanced.
    pub async fn update_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        mut updates: UpdateUser,
    ) -> PgResult<User> {
        use schema::users::{self, dsl};

        if let Some(username) = updates.username.as_mut() {
            *username = username.trim().to_owned();
        }
        if let Some(email) = updates.email_address.as_mut() {
            *email = email.trim().to_lowercase();
        }

        diesel::update(
            users::table
                .filter(dsl::id.eq(user_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set((&updates, dsl::updated_at.eq(diesel::dsl::now)))
        .returning(User::as_returning())
        .get_result(conn)
        .await
        .map_err(PgError::from)
    }

    /// Assigns a new role to a user.
    pub async fn assign_role(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        role: UserRole,
    ) -> PgResult<User> {
        Self::update_user(
            conn,
            user_id,
            UpdateUser {
                role: Some(role),
                ..Default::default()
            },
        )
        .await
    }

    /// Soft deletes a user by setting the deletion timestamp.
    ///
    /// Preserves the row for audit purposes. Returns `None` if the user was
    /// not found or was already deleted.
    pub async fn delete_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(
            users::table
                .filter(dsl::id.eq(user_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set((
            dsl::deleted_at.eq(diesel::dsl::now),
            dsl::updated_at.eq(diesel::dsl::now),
        ))
        .returning(User::as_returning())
        .get_result(conn)
        .await
        .optional()
        .map_err(PgError::from)
    }

    /// Lists all active users with pagination support.
    ///
    /// Users are ordered by creation time with most recent first.
    pub async fn list_users(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::deleted_at.is_null())
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists active users holding a specific role, with pagination support.
    pub async fn list_users_by_role(
        conn: &mut AsyncPgConnection,
        role: UserRole,
        pagination: Pagination,
    ) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::role.eq(role))
            .filter(dsl::deleted_at.is_null())
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Checks if an email address is already registered in the system.
    ///
    /// Used during registration to prevent duplicate accounts.
    pub async fn email_exists(conn: &mut AsyncPgConnection, email: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .filter(dsl::deleted_at.is_null())
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    /// Checks if a username is already taken.
    pub async fn username_exists(conn: &mut AsyncPgConnection, username: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::username.eq(username.trim()))
            .filter(dsl::deleted_at.is_null())
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }
}
