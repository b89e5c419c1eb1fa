use std::time::Duration;

use crate::models::workspace::WorkspaceStore;
use crate::session::rate_limit::GenerationLimiter;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically discard idle workspaces and stale rate-limit entries.
pub fn spawn_sweeper(store: WorkspaceStore, limiter: GenerationLimiter, idle_ttl: Duration) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let purged = store.purge_idle(idle_ttl);
            if purged > 0 {
                log::info!("Purged {} idle workspace(s), {} still live", purged, store.len());
            }
            limiter.prune();
        }
    });
}
