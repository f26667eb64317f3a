use std::sync::Arc;
use std::time::Duration;

use deadpool::managed::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

use crate::{
    ConnectionPool, PgConfig, PgError, PgResult, PooledConnection, TRACING_TARGET_CONNECTION,
};

/// Acquisition slower than this is logged as a warning.
const SLOW_ACQUIRE_THRESHOLD: Duration = Duration::from_millis(100);

/// Point-in-time snapshot of the connection pool.
#[derive(Debug, Clone)]
pub struct PgPoolStatus {
    /// Upper bound on pooled connections.
    pub max_size: usize,
    /// Connections currently open.
    pub size: usize,
    /// Open connections not checked out.
    pub available: usize,
    /// Callers blocked waiting for a connection.
    pub waiting: usize,
}

impl PgPoolStatus {
    /// Fraction of the pool currently checked out, 0.0 to 1.0.
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            return 0.0;
        }
        (self.size - self.available) as f64 / self.max_size as f64
    }

    /// Returns whether callers are queueing or the pool is nearly exhausted.
    pub fn is_under_pressure(&self) -> bool {
        self.waiting > 0 || self.utilization() > 0.8
    }
}

/// Shared handle to the Postgres connection pool.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Validates the configuration and builds the connection pool.
    ///
    /// No connection is opened yet; the pool fills lazily on first use.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CONNECTION,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        config.validate()?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            max_connections = config.postgres_max_connections,
            connection_timeout_secs = config.postgres_connection_timeout_secs,
            "Initializing database client"
        );

        let manager = AsyncDieselConnectionManager::new(&config.postgres_url);
        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(config.connection_timeout())
            .create_timeout(config.connection_timeout())
            .runtime(deadpool::Runtime::Tokio1)
            .build()
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %error,
                    "Could not build the connection pool"
                );
                PgError::Unexpected(format!("failed to build connection pool: {error}").into())
            })?;

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Checks out a connection, waiting up to the configured timeout.
    ///
    /// Dropping the returned guard hands the connection back to the pool.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_CONNECTION)]
    pub async fn get_connection(&self) -> PgResult<PooledConnection> {
        let started = std::time::Instant::now();

        let conn = self.inner.pool.get().await.map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %error,
                elapsed = ?started.elapsed(),
                "Could not acquire a database connection"
            );
            PgError::from(error)
        })?;

        let elapsed = started.elapsed();
        if elapsed > SLOW_ACQUIRE_THRESHOLD {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                "Slow connection acquisition, pool may be saturated"
            );
        }

        Ok(conn)
    }

    /// Snapshots the pool counters for health reporting.
    pub fn pool_status(&self) -> PgPoolStatus {
        let status = self.inner.pool.status();
        PgPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

impl std::fmt::Debug for PgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pool_status = self.pool_status();
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("pool_max_size", &pool_status.max_size)
            .field("pool_size", &pool_status.size)
            .field("pool_available", &pool_status.available)
            .field("pool_waiting", &pool_status.waiting)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(size: usize, available: usize, waiting: usize) -> PgPoolStatus {
        PgPoolStatus {
            max_size: 10,
            size,
            available,
            waiting,
        }
    }

    #[test]
    fn idle_pool_reports_no_pressure() {
        let idle = status(4, 4, 0);
        assert_eq!(idle.utilization(), 0.0);
        assert!(!idle.is_under_pressure());
    }

    #[test]
    fn queueing_callers_mean_pressure() {
        assert!(status(10, 0, 3).is_under_pressure());
        assert!(status(10, 1, 0).is_under_pressure());
        assert!(!status(10, 5, 0).is_under_pressure());
    }

    #[test]
    fn invalid_config_never_builds_a_pool() {
        let result = PgClient::new(PgConfig::new("postgresql://localhost/db").with_max_connections(0));
        assert!(result.is_err());
    }
}
