//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request payload to register a new account.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired login name (1-64 characters, letters, digits, `_`, `-`, `.`).
    #[validate(length(min = 1, max = 64))]
    #[validate(custom(function = "validate_username_format"))]
    pub username: String,

    /// Email address used for authentication.
    #[validate(email)]
    #[validate(length(min = 5, max = 254))]
    pub email_address: String,

    /// Plaintext password (will be hashed before storage).
    #[validate(length(min = 8, max = 256))]
    pub password: String,
}

/// Request payload to sign in with existing credentials.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address used for authentication.
    #[validate(email)]
    #[validate(length(min = 5, max = 254))]
    pub email_address: String,

    /// Plaintext password to verify.
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

fn validate_username_format(username: &str) -> Result<(), ValidationError> {
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(ValidationError::new("username_format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_valid_payload() {
        let request = RegisterRequest {
            username: "courier_77".to_owned(),
            email_address: "courier@example.com".to_owned(),
            password: "long-enough-password".to_owned(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn register_rejects_short_password() {
        let request = RegisterRequest {
            username: "courier_77".to_owned(),
            email_address: "courier@example.com".to_owned(),
            password: "short".to_owned(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_rejects_username_with_spaces() {
        let request = RegisterRequest {
            username: "not a username".to_owned(),
            email_address: "courier@example.com".to_owned(),
            password: "long-enough-password".to_owned(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn login_rejects_malformed_email() {
        let request = LoginRequest {
            email_address: "not-an-email".to_owned(),
            password: "whatever".to_owned(),
        };
        assert!(request.validate().is_err());
    }
}
