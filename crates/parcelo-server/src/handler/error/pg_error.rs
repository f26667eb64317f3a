//! Database error to HTTP error conversion.
//!
//! This module converts [`PgError`] values surfaced by the repositories into
//! HTTP error responses. Constraint violations are routed to the per-table
//! handlers in the sibling modules; everything else collapses into a 500
//! after being logged.

use parcelo_postgres::PgError;
use parcelo_postgres::error::ErrorHint;
use parcelo_postgres::types::ConstraintViolation;

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error translation.
const TRACING_TARGET: &str = "parcelo_server::postgres_constraints";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::Parcel(c) => c.into(),
            ConstraintViolation::Location(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    hint = %timeout.hint(),
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                // Missing rows become 404s at the handler boundary.
                if error.is_not_found() {
                    return ErrorKind::NotFound.into_error();
                }

                // Try to extract a constraint violation.
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                // Generic query error without a constraint.
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

// Used only for transactions.
impl From<parcelo_postgres::error::DieselError> for Error<'static> {
    fn from(error: parcelo_postgres::error::DieselError) -> Self {
        // Convert DieselError -> PgError -> Error
        let pg_error: PgError = error.into();
        pg_error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_query_maps_to_404() {
        let pg_error = PgError::Query(parcelo_postgres::error::DieselError::NotFound);
        let error: Error<'static> = pg_error.into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn timeout_maps_to_500() {
        let pg_error = PgError::Timeout(parcelo_postgres::error::TimeoutType::Wait);
        let error: Error<'static> = pg_error.into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}
