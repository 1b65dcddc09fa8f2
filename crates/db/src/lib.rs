//! Postgres persistence for the storefront.
//!
//! - [`config`] -- pool tuning knobs loaded from the environment.
//! - [`error`] -- [`DbError`] and classification of raw sqlx failures.
//! - [`query`] -- the shared filtered/paginated list query builder.
//! - [`models`] -- row structs, DTOs, filters and sort safe-lists.
//! - [`repositories`] -- per-entity CRUD with version-checked updates.

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use config::DbConfig;
pub use error::{DbError, DbResult};

pub type DbPool = sqlx::PgPool;

/// Deadline for point lookups and single-row writes.
pub const POINT_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for list queries (filter + window count).
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a connection pool from configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .max_lifetime(Some(config.max_lifetime))
        .idle_timeout(Some(config.idle_timeout))
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), DbError> {
    with_timeout(POINT_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await?;
    Ok(())
}

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Await a database future under a deadline.
///
/// Elapsed deadlines surface as [`DbError::Timeout`]. The inner future is
/// dropped on expiry, which cancels the in-flight query.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> DbResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => {
            tracing::warn!(?limit, "Database operation timed out");
            Err(DbError::Timeout(limit))
        }
    }
}
