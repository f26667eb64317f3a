//! Symmetric token signing keys derived from the configured secret.

use std::fmt;
use std::sync::Arc;

use jiff::SignedDuration;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::{Error, Result};

/// Minimum accepted secret length in bytes.
///
/// HS256 keys shorter than the hash output size weaken the HMAC, so
/// anything below 32 bytes is rejected at startup.
const MIN_SECRET_LENGTH: usize = 32;

/// HS256 signing and verification keys for authentication tokens.
///
/// Both keys are derived from a single shared secret and kept behind an
/// [`Arc`], making this service cheap to clone into application state.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

struct AuthKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: SignedDuration,
}

impl AuthKeys {
    /// Derives signing keys from the shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - Shared secret used for HMAC signing and verification
    /// * `token_ttl_minutes` - Lifetime of issued access tokens in minutes
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the secret is shorter than
    /// 32 bytes or the token lifetime is zero.
    pub fn from_secret(secret: &str, token_ttl_minutes: u32) -> Result<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(Error::config(
                "Authentication secret must be at least 32 bytes long",
            ));
        }

        if token_ttl_minutes == 0 {
            return Err(Error::config(
                "Authentication token lifetime must be at least 1 minute",
            ));
        }

        let inner = AuthKeysInner {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: SignedDuration::from_mins(i64::from(token_ttl_minutes)),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the key used to sign issued tokens.
    #[inline]
    #[must_use]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the key used to verify presented tokens.
    #[inline]
    #[must_use]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the configured lifetime of issued access tokens.
    #[inline]
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        self.inner.token_ttl
    }
}

// Key material must never leak into logs.
impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys")
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .field("token_ttl", &self.inner.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "an-adequately-long-shared-secret-value";

    #[test]
    fn accepts_sufficiently_long_secret() {
        let keys = AuthKeys::from_secret(TEST_SECRET, 60).unwrap();
        assert_eq!(keys.token_ttl(), SignedDuration::from_mins(60));
    }

    #[test]
    fn rejects_short_secret() {
        assert!(AuthKeys::from_secret("too-short", 60).is_err());
    }

    #[test]
    fn rejects_zero_lifetime() {
        assert!(AuthKeys::from_secret(TEST_SECRET, 0).is_err());
    }

    #[test]
    fn debug_output_redacts_key_material() {
        let keys = AuthKeys::from_secret(TEST_SECRET, 60).unwrap();
        let debug = format!("{keys:?}");
        assert!(!debug.contains(TEST_SECRET));
        assert!(debug.contains("<redacted>"));
    }
}
