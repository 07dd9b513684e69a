use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::core::ports::cache::DetailCache;
use crate::core::ports::search::SearchIndex;

const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Periodically logs pool pressure and projection sizes. The counters come
/// from the projections themselves so drift between them is visible in logs.
pub fn spawn_reporter<C, X>(pool: PgPool, cache: Arc<C>, index: Arc<X>)
where
    C: DetailCache + 'static,
    X: SearchIndex + 'static,
{
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(REPORT_INTERVAL);
        loop {
            ticker.tick().await;
            let cached = cache.count().await.unwrap_or(0);
            let indexed = index.count().await.unwrap_or(0);
            log::info!(
                "pool connections={} idle={} cached details={} indexed documents={}",
                pool.size(),
                pool.num_idle(),
                cached,
                indexed
            );
        }
    });
}
