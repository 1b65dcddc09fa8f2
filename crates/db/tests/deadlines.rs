//! Database calls under a deadline.
//!
//! A query that outlives its deadline surfaces as `DbError::Timeout`, never
//! as a hang or a generic sqlx error, and the pool stays usable afterwards.

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_db::{health_check, with_timeout, DbError};

#[sqlx::test(migrations = "../../migrations")]
async fn slow_query_fails_with_timeout(pool: PgPool) {
    let limit = Duration::from_millis(50);
    let started = Instant::now();

    let result = with_timeout(limit, sqlx::query("SELECT pg_sleep(1)").execute(&pool)).await;

    assert_matches!(result, Err(DbError::Timeout(got)) if got == limit);
    assert!(started.elapsed() < Duration::from_millis(900));
}

#[sqlx::test(migrations = "../../migrations")]
async fn timeout_maps_to_core_timeout(pool: PgPool) {
    let err = with_timeout(
        Duration::from_millis(20),
        sqlx::query("SELECT pg_sleep(1)").execute(&pool),
    )
    .await
    .unwrap_err();

    assert_matches!(CoreError::from(err), CoreError::Timeout(_));
}

#[sqlx::test(migrations = "../../migrations")]
async fn pool_recovers_after_abandoned_query(pool: PgPool) {
    let _ = with_timeout(
        Duration::from_millis(20),
        sqlx::query("SELECT pg_sleep(1)").execute(&pool),
    )
    .await;

    health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
async fn fast_query_is_unaffected(pool: PgPool) {
    let value: i32 = with_timeout(
        Duration::from_secs(5),
        sqlx::query_scalar("SELECT 41 + 1").fetch_one(&pool),
    )
    .await
    .unwrap();
    assert_eq!(value, 42);
}
