//! Periodic sweep of empty, stale classrooms.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::domain::now_millis;
use crate::store::{ReapReport, SessionStore};

/// Shortest accepted sweep period; `interval_at` panics on zero.
pub const MIN_REAP_INTERVAL: Duration = Duration::from_secs(1);

pub struct ReapJob {
    store: Arc<SessionStore>,
    interval: Duration,
    max_age: Duration,
}

impl ReapJob {
    /// `interval` is raised to [`MIN_REAP_INTERVAL`] if shorter.
    pub fn new(store: Arc<SessionStore>, interval: Duration, max_age: Duration) -> Self {
        Self {
            store,
            interval: interval.max(MIN_REAP_INTERVAL),
            max_age,
        }
    }

    pub fn from_config(store: Arc<SessionStore>, config: &ServerConfig) -> Self {
        Self::new(store, config.reap_interval, config.reap_max_age)
    }

    /// One sweep against the wall clock.
    pub fn run_once(&self) -> ReapReport {
        let report = self.store.reap(now_millis(), self.max_age);
        for code in &report.classrooms {
            info!(classroom = %code, "reaped empty classroom");
        }
        if !report.orphan_boards.is_empty() {
            info!(count = report.orphan_boards.len(), "reaped orphan score boards");
        }
        report
    }

    /// Sweep every `interval` until `cancel` fires. The first sweep happens
    /// one interval after spawning.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                interval_secs = self.interval.as_secs(),
                max_age_secs = self.max_age.as_secs(),
                "reap job started"
            );

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let report = self.run_once();
                        debug!(
                            classrooms = report.classrooms.len(),
                            orphan_boards = report.orphan_boards.len(),
                            "reap sweep finished"
                        );
                    }
                }
            }

            info!("reap job stopped");
        })
    }
}
