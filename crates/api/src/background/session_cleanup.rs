//! Periodic purge of dead sessions.
//!
//! Deletes sessions that expired, and revoked sessions untouched for longer
//! than the retention period.

use std::time::Duration;

use chrono::Utc;
use storefront_db::repositories::SessionRepo;
use storefront_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cleanup loop until `cancel` is triggered.
///
/// `retention` comes from `ServerConfig::session_retention`.
pub async fn run(pool: DbPool, retention: chrono::Duration, cancel: CancellationToken) {
    tracing::info!(
        retention_hours = retention.num_hours(),
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Session cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - retention;
                match SessionRepo::purge_expired(&pool, cutoff).await {
                    Ok(0) => tracing::debug!("Session cleanup: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Session cleanup: purged sessions"),
                    Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
                }
            }
        }
    }
}
