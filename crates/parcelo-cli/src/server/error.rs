//! Server lifecycle error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Failure modes of the HTTP server lifecycle.
///
/// Each variant maps to one phase: configuration checks, binding the
/// listener, and serving traffic.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The resolved configuration failed validation.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The TCP listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server failed while serving traffic.
    #[error("server terminated abnormally: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Stable code identifying the failed lifecycle phase, used in logs.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::Bind { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// Returns whether a retry could plausibly succeed.
    ///
    /// Configuration errors always need operator intervention. Bind and
    /// runtime errors depend on the underlying I/O failure.
    pub fn is_recoverable(&self) -> bool {
        let io_kind = match self {
            Self::InvalidConfig(_) => return false,
            Self::Bind { source, .. } => source.kind(),
            Self::Runtime(source) => source.kind(),
        };

        matches!(
            io_kind,
            io::ErrorKind::AddrInUse
                | io::ErrorKind::AddrNotAvailable
                | io::ErrorKind::ConnectionRefused
                | io::ErrorKind::Interrupted
                | io::ErrorKind::PermissionDenied
                | io::ErrorKind::TimedOut
        )
    }

    /// Operator-facing hint for the most common causes.
    pub fn suggestion(&self) -> Option<&'static str> {
        let hint = match self {
            Self::InvalidConfig(_) => "review the server flags and environment variables",
            Self::Bind { source, .. } => match source.kind() {
                io::ErrorKind::AddrInUse => {
                    "another process holds the port; pick a different one or stop it"
                }
                io::ErrorKind::PermissionDenied => {
                    "binding below port 1024 needs elevated privileges"
                }
                io::ErrorKind::AddrNotAvailable => {
                    "the host address does not belong to any local interface"
                }
                _ => return None,
            },
            Self::Runtime(source) => match source.kind() {
                io::ErrorKind::TimedOut => "consider raising the request or shutdown timeouts",
                _ => return None,
            },
        };

        Some(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind_error(kind: io::ErrorKind) -> ServerError {
        ServerError::Bind {
            address: "127.0.0.1:80".to_owned(),
            source: io::Error::new(kind, "bind failed"),
        }
    }

    #[test]
    fn each_phase_has_its_own_code() {
        let errors = [
            ServerError::InvalidConfig("bad port".to_owned()),
            bind_error(io::ErrorKind::AddrInUse),
            ServerError::Runtime(io::Error::other("boom")),
        ];

        let codes: Vec<_> = errors.iter().map(ServerError::error_code).collect();
        let mut deduped = codes.clone();
        deduped.dedup();
        assert_eq!(codes, deduped);
    }

    #[test]
    fn occupied_port_is_recoverable_with_hint() {
        let error = bind_error(io::ErrorKind::AddrInUse);
        assert!(error.is_recoverable());
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn config_errors_are_terminal() {
        let error = ServerError::InvalidConfig("shutdown timeout out of range".to_owned());
        assert!(!error.is_recoverable());
    }
}
