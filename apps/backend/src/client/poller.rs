//! Background refresh of a classroom's roster and leaderboard.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::ClientError;
use super::http::ClassroomClient;
use crate::domain::{Player, ScoreEntry};

/// How often a connected browser refreshes its player list.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Shortest accepted poll period; `tokio::time::interval` panics on zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomSnapshot {
    pub players: Vec<Player>,
    pub leaderboard: Vec<ScoreEntry>,
}

/// Owner of a running poller. Dropping it stops the task.
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    snapshots: watch::Receiver<ClassroomSnapshot>,
}

impl PollHandle {
    /// Receiver that observes every snapshot the poller publishes.
    pub fn subscribe(&self) -> watch::Receiver<ClassroomSnapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> ClassroomSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and wait for the task to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "classroom poller task failed");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Poll `code` every `interval`, starting immediately. Failures are logged
/// and skipped until the next tick; there is no backoff. Intervals below
/// [`MIN_POLL_INTERVAL`] are raised to it.
pub fn spawn_poller(client: ClassroomClient, code: String, interval: Duration) -> PollHandle {
    let interval = interval.max(MIN_POLL_INTERVAL);
    let cancel = CancellationToken::new();
    let (tx, rx) = watch::channel(ClassroomSnapshot::default());
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = token.cancelled() => break,
                result = poll_once(&client, &code) => match result {
                    Ok(snapshot) => {
                        tx.send_replace(snapshot);
                    }
                    Err(err) => warn!(classroom = %code, error = %err, "classroom poll failed"),
                },
            }
        }

        debug!(classroom = %code, "classroom poller stopped");
    });

    PollHandle {
        cancel,
        task: Some(task),
        snapshots: rx,
    }
}

async fn poll_once(client: &ClassroomClient, code: &str) -> Result<ClassroomSnapshot, ClientError> {
    let players = client.players(code).await?;
    let leaderboard = client.leaderboard(code).await?;
    Ok(ClassroomSnapshot {
        players,
        leaderboard,
    })
}
