//! Periodic database reachability check.

use std::time::Duration;

use storefront_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Ping the pool every `interval` until `cancel` fires.
///
/// Failures are logged and the loop keeps going; the pool reconnects on
/// its own once the database is back.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Pool health check started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut healthy = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Pool health check stopping");
                break;
            }
            _ = ticker.tick() => {
                match storefront_db::health_check(&pool).await {
                    Ok(()) => {
                        if !healthy {
                            tracing::info!("Database reachable again");
                        }
                        healthy = true;
                        tracing::debug!(size = pool.size(), idle = pool.num_idle(), "Pool healthy");
                    }
                    Err(e) => {
                        healthy = false;
                        tracing::error!(error = %e, "Pool health check failed");
                    }
                }
            }
        }
    }
}
