//! Embedded database migration management.
//!
//! Migrations are compiled into the binary via `embed_migrations!` and applied
//! at startup before the server begins accepting requests.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Result of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Versions of the migrations applied during this run, in order.
    pub applied_versions: Vec<String>,
    /// Total wall-clock time the run took.
    pub duration: Duration,
}

impl MigrationResult {
    /// Returns the number of migrations applied during this run.
    #[inline]
    pub fn applied_count(&self) -> usize {
        self.applied_versions.len()
    }

    /// Returns whether any migrations were applied.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied_versions.is_empty()
    }
}

/// Runs all pending migrations on the database.
///
/// Safe to call multiple times: already-applied migrations are skipped.
/// The diesel migration harness is synchronous, so the run is moved onto
/// a blocking task via [`AsyncConnectionWrapper`].
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        "Starting database migration process",
    );

    let start_time = Instant::now();
    let conn = pg.get_connection().await?;

    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let results = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect())
    })
    .await;

    let duration = start_time.elapsed();
    let results = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Migration task panicked, join error occurred"
        );

        PgError::Migration(err.into())
    })?;

    let applied_versions: Vec<String> = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = &err,
            "Database migration process failed"
        );

        PgError::Migration(err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        migrations_count = applied_versions.len(),
        "Database migration process completed successfully"
    );

    Ok(MigrationResult {
        applied_versions,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_result_counts() {
        let result = MigrationResult {
            applied_versions: vec!["2025-06-01-000000".to_owned()],
            duration: Duration::from_millis(10),
        };
        assert_eq!(result.applied_count(), 1);
        assert!(!result.is_noop());

        let noop = MigrationResult {
            applied_versions: vec![],
            duration: Duration::ZERO,
        };
        assert!(noop.is_noop());
    }
}
