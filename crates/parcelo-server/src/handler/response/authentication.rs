//! Authentication response types.

use jiff::Timestamp;
use parcelo_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned after successful registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// ID of the newly created user.
    pub user_id: Uuid,

    /// Username of the user.
    pub username: String,
    /// Email address of the user.
    pub email_address: String,
    /// Role assigned at registration.
    pub role: UserRole,

    /// Timestamp when the user was created.
    pub created_at: Timestamp,
}

/// Response returned after successful login.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// ID of the authenticated user.
    pub user_id: Uuid,

    /// Signed bearer token to present in the `Authorization` header.
    pub access_token: String,

    /// Timestamp when the token was issued.
    pub issued_at: Timestamp,
    /// Timestamp when the token expires.
    pub expires_at: Timestamp,
}
