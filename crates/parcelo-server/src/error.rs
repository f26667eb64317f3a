//! Errors raised while bringing the service up.
//!
//! Request-time failures use the handler error type; this one covers the
//! startup path, where a bad configuration value or an unreachable backing
//! service should stop the process with a chained cause.

use std::borrow::Cow;
use std::error::Error as StdError;

/// Boxed source error carried on the bootstrap variant.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service construction.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure encountered before the service could start serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value was missing or rejected by validation.
    #[error("configuration error: {0}")]
    Config(Cow<'static, str>),

    /// A backing service could not be initialized.
    #[error("{service} startup failed: {message}")]
    Bootstrap {
        service: &'static str,
        message: Cow<'static, str>,
        #[source]
        source: Option<BoxedError>,
    },
}

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a bootstrap error for the named backing service.
    #[inline]
    pub fn bootstrap(service: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Bootstrap {
            service,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[inline]
    pub fn with_source(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        if let Self::Bootstrap { source, .. } = &mut self {
            *source = Some(Box::new(cause));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_carry_the_message() {
        let error = Error::config("auth secret is too short");
        assert_eq!(error.to_string(), "configuration error: auth secret is too short");
    }

    #[test]
    fn bootstrap_errors_chain_their_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::bootstrap("postgres", "could not open a connection").with_source(cause);

        assert!(error.to_string().starts_with("postgres startup failed"));
        assert!(StdError::source(&error).is_some());
    }
}
