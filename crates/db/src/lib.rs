//! Persistence layer for the screenings API.
//!
//! Owns the Postgres pool, the embedded migrations, the row/view models and
//! the zero-sized repositories that run SQL against the pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Pool sizing and acquisition limits.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Upper bound on waiting for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, settings: PoolSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Coarse classification of a store failure, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store could not be reached or no connection was available.
    Unavailable,
    /// The store answered but rejected the statement.
    QueryFailed,
}

impl StoreErrorKind {
    pub fn classify(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreErrorKind::Unavailable,
            _ => StoreErrorKind::QueryFailed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoreErrorKind::Unavailable => "store_unavailable",
            StoreErrorKind::QueryFailed => "query_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_are_unavailable() {
        assert_eq!(
            StoreErrorKind::classify(&sqlx::Error::PoolTimedOut),
            StoreErrorKind::Unavailable
        );
        assert_eq!(
            StoreErrorKind::classify(&sqlx::Error::PoolClosed),
            StoreErrorKind::Unavailable
        );
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(
            StoreErrorKind::classify(&sqlx::Error::Io(io)),
            StoreErrorKind::Unavailable
        );
    }

    #[test]
    fn everything_else_is_a_query_failure() {
        assert_eq!(
            StoreErrorKind::classify(&sqlx::Error::RowNotFound),
            StoreErrorKind::QueryFailed
        );
        assert_eq!(
            StoreErrorKind::classify(&sqlx::Error::Protocol("bad message".into())),
            StoreErrorKind::QueryFailed
        );
    }
}
