use std::borrow::Cow;

use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use parcelo_postgres::model::User;
use parcelo_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// JWT claims for authentication tokens.
///
/// This structure contains both RFC 7519 standard JWT claims and the custom
/// role claim used for authorization. The `iat` and `exp` claims are
/// serialized as Unix timestamps in seconds so that standard JWT expiration
/// validation applies.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct AuthClaims {
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    /// Audience (who the token is intended for).
    #[serde(rename = "aud")]
    audience: Cow<'static, str>,

    /// JWT ID (unique identifier for token, useful for revocation).
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Subject ID (unique identifier for the associated user).
    #[serde(rename = "sub")]
    pub user_id: Uuid,

    /// Issued at (Unix timestamp in seconds).
    #[serde(rename = "iat", with = "unix_seconds")]
    pub issued_at: Timestamp,
    /// Expiration time (Unix timestamp in seconds).
    #[serde(rename = "exp", with = "unix_seconds")]
    pub expires_at: Timestamp,

    /// Role the user held when the token was issued.
    ///
    /// Authorization decisions never trust this claim alone: the current
    /// role is re-read from the database on every authenticated request.
    #[serde(rename = "rol")]
    pub role: UserRole,
}

impl AuthClaims {
    /// Default JWT audience identifier for authentication tokens.
    const JWT_AUDIENCE: &str = "parcelo:server";
    /// Default JWT issuer identifier for authentication tokens.
    const JWT_ISSUER: &str = "parcelo";

    /// Creates a new claims structure for a freshly authenticated user.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user record
    /// * `time_to_live` - How long the issued token remains valid
    pub fn new(user: &User, time_to_live: SignedDuration) -> Self {
        let issued_at = Timestamp::now();
        Self {
            issued_by: Cow::Borrowed(Self::JWT_ISSUER),
            audience: Cow::Borrowed(Self::JWT_AUDIENCE),
            token_id: Uuid::new_v4(),
            user_id: user.id,
            issued_at,
            expires_at: issued_at
                .saturating_add(time_to_live)
                .expect("saturating_add with a SignedDuration cannot fail"),
            role: user.role,
        }
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Encodes the claims into a signed compact JWT token.
    ///
    /// # Errors
    ///
    /// Returns an internal server error if JWT encoding fails.
    pub fn into_token(self, encoding_key: &EncodingKey) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, &self, encoding_key).map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %error,
                user_id = %self.user_id,
                "Failed to encode JWT token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_context("Unable to create access token")
                .with_resource("authentication")
        })
    }

    /// Parses and validates a JWT token from an Authorization header.
    ///
    /// Validation covers the HMAC signature, the issuer and audience claims,
    /// the presence of all registered claims, and expiration.
    ///
    /// # Errors
    ///
    /// Returns authentication errors for invalid or expired tokens.
    pub fn from_header(
        auth_header: &TypedHeader<Authorization<Bearer>>,
        decoding_key: &DecodingKey,
    ) -> Result<Self> {
        Self::from_token(auth_header.token(), decoding_key)
    }

    /// Parses and validates a compact JWT token.
    ///
    /// # Errors
    ///
    /// Returns authentication errors for invalid or expired tokens.
    pub fn from_token(auth_token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false; // Not Before claim not used
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "exp"]);

        let token_data = decode::<Self>(auth_token, decoding_key, &validation)?;
        let claims = token_data.claims;

        // Double-check expiration after signature verification
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                user_id = %claims.user_id,
                expired_at = %claims.expires_at,
                "JWT token validation failed: token expired"
            );

            return Err(ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue")
                .with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_id = %claims.token_id,
            user_id = %claims.user_id,
            role = %claims.role,
            "JWT token validation completed successfully"
        );

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue")
                .with_resource("authentication"),
            JwtErrorKind::InvalidIssuer
            | JwtErrorKind::InvalidAudience
            | JwtErrorKind::InvalidSubject
            | JwtErrorKind::ImmatureSignature
            | JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token could not be verified")
                .with_context("Please sign in again to continue")
                .with_resource("authentication"),
            JwtErrorKind::InvalidKeyFormat
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::InvalidAlgorithmName => {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %error,
                    "JWT key or algorithm configuration error"
                );

                ErrorKind::InternalServerError
                    .with_message("Authentication is temporarily unavailable")
                    .with_resource("authentication")
            }
            _ => ErrorKind::MalformedAuthToken.into_error(),
        }
    }
}

/// Serde adapter mapping [`Timestamp`] to Unix seconds.
///
/// Standard JWT validators compare `iat` and `exp` numerically, so these
/// claims must not be serialized in a textual format.
mod unix_seconds {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        timestamp.as_second().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i64::deserialize(deserializer)?;
        Timestamp::from_second(seconds).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use jiff_diesel::Timestamp as DieselTimestamp;

    use super::*;

    fn sample_user() -> User {
        let now = DieselTimestamp::from(Timestamp::now());
        User {
            id: Uuid::new_v4(),
            username: "alice".to_owned(),
            email_address: "alice@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            role: UserRole::Courier,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_keys() -> (EncodingKey, DecodingKey) {
        let secret = b"test-secret-test-secret-test-secret!";
        (
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let (encoding_key, decoding_key) = sample_keys();
        let user = sample_user();

        let claims = AuthClaims::new(&user, SignedDuration::from_mins(30));
        let token = claims.clone().into_token(&encoding_key).unwrap();
        let decoded = AuthClaims::from_token(&token, &decoding_key).unwrap();

        assert_eq!(decoded.user_id, user.id);
        assert_eq!(decoded.role, UserRole::Courier);
        assert_eq!(decoded.token_id, claims.token_id);
        assert!(!decoded.is_expired());
    }

    #[test]
    fn expired_token_is_rejected() {
        let (encoding_key, decoding_key) = sample_keys();
        let user = sample_user();

        let mut claims = AuthClaims::new(&user, SignedDuration::from_mins(30));
        claims.issued_at = Timestamp::now()
            .saturating_add(SignedDuration::from_hours(-2))
            .unwrap();
        claims.expires_at = Timestamp::now()
            .saturating_add(SignedDuration::from_hours(-1))
            .unwrap();

        let token = claims.into_token(&encoding_key).unwrap();
        let error = AuthClaims::from_token(&token, &decoding_key).unwrap_err();
        assert_eq!(error.kind(), crate::handler::ErrorKind::Unauthorized);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let (encoding_key, _) = sample_keys();
        let other_key = DecodingKey::from_secret(b"a-completely-different-secret-value!");
        let user = sample_user();

        let claims = AuthClaims::new(&user, SignedDuration::from_mins(30));
        let token = claims.into_token(&encoding_key).unwrap();

        assert!(AuthClaims::from_token(&token, &other_key).is_err());
    }

    #[test]
    fn claims_serialize_numeric_timestamps() {
        let user = sample_user();
        let claims = AuthClaims::new(&user, SignedDuration::from_mins(30));

        let value = serde_json::to_value(&claims).unwrap();
        assert!(value["iat"].is_i64());
        assert!(value["exp"].is_i64());
        assert_eq!(value["rol"], "courier");
    }
}
