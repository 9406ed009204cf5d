use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::services::AppState;

/// Periodically drops idle sessions so abandoned tabs don't pile up.
pub struct SessionSweeper {
    state: Arc<AppState>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(state: Arc<AppState>) -> Self {
        // Sweep a few times per TTL, but not more than once a second
        let ttl = state.config.session_ttl_seconds.max(1) as u64;
        let interval = Duration::from_secs((ttl / 4).clamp(1, 300));
        Self { state, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn sweep(&self) -> usize {
        let removed = self.state.sessions.purge_expired();
        debug!(
            "Session sweep removed {} (live: {})",
            removed,
            self.state.sessions.len()
        );
        removed
    }

    pub async fn run(self) {
        info!(
            "Starting session sweeper loop (interval {}s)",
            self.interval.as_secs()
        );
        loop {
            sleep(self.interval).await;
            self.sweep();
        }
    }
}
