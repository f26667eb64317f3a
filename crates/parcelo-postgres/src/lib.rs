#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

/// Tracing target for migration events.
pub const TRACING_TARGET_MIGRATION: &str = "parcelo_postgres::migrations";

/// Tracing target for pool and connection events.
pub const TRACING_TARGET_CONNECTION: &str = "parcelo_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::migrate::{MigrationResult, run_pending_migrations};
pub use crate::client::{ConnectionPool, PgClient, PgConfig, PgPoolStatus, PooledConnection};

pub mod error {
    //! Error utilities and re-exports of the underlying driver error types.
    //!
    //! The crate-wide error type is [`PgError`] at the crate root; this
    //! module collects the diesel and deadpool types it wraps.
    //!
    //! [`PgError`]: crate::PgError

    use std::borrow::Cow;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::Error as DieselError;
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    /// Attaches an operator-facing remediation hint to an error value.
    pub trait ErrorHint {
        /// Returns the hint text for this error.
        fn hint(&self) -> Cow<'static, str>;
    }

    impl ErrorHint for TimeoutType {
        fn hint(&self) -> Cow<'static, str> {
            match self {
                TimeoutType::Wait => Cow::Borrowed(
                    "all pooled connections are busy; raise the pool size or look for slow queries",
                ),
                TimeoutType::Create => Cow::Borrowed(
                    "opening a new connection timed out; verify the database is up and the URL is right",
                ),
                TimeoutType::Recycle => Cow::Borrowed(
                    "a pooled connection could not be reused and was discarded",
                ),
            }
        }
    }
}

/// Error type for every database operation in this crate.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// The pool configuration was rejected before any connection was made.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Acquiring, creating, or recycling a connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// The connection itself failed: bad credentials, network, or URL.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// A schema migration could not be applied.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// A query failed, including constraint violations and missing rows.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// A failure outside the categories above.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Name of the violated constraint, when this wraps one.
    ///
    /// Handlers use the name to map database rejections onto specific
    /// user-facing messages.
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(Error::DatabaseError(_, info)) = self else {
            return None;
        };
        info.constraint_name()
    }

    /// Returns whether this error is the diesel `NotFound` query error.
    ///
    /// Useful for translating missing rows into HTTP 404 responses at the
    /// handler boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PgError::Query(Error::NotFound))
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            // The pool is configured without hooks and with an explicit
            // runtime, so these two should never fire.
            DeadpoolError::PostCreateHook(error) => Self::Unexpected(error.to_string().into()),
            DeadpoolError::NoRuntimeSpecified => {
                Self::Unexpected("no async runtime specified for the pool".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_are_distinguishable() {
        assert!(PgError::from(Error::NotFound).is_not_found());
        assert!(!PgError::Config("bad".to_owned()).is_not_found());
    }

    #[test]
    fn non_query_errors_carry_no_constraint() {
        assert_eq!(PgError::Timeout(TimeoutType::Wait).constraint(), None);
        assert_eq!(PgError::from(Error::NotFound).constraint(), None);
    }
}
