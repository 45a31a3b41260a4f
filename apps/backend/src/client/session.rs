use std::time::Duration;

use tokio::sync::watch;

use super::error::ClientError;
use super::http::ClassroomClient;
use super::poller::{spawn_poller, ClassroomSnapshot, PollHandle};
use crate::domain::{now_millis, Classroom, Player, ScoreEntry};

/// A player's live membership in one classroom.
///
/// Polling runs for as long as the session exists and is stopped before the
/// leave request is sent.
pub struct ClassroomSession {
    client: ClassroomClient,
    code: String,
    player: Player,
    poller: PollHandle,
}

impl ClassroomSession {
    pub async fn create(
        client: ClassroomClient,
        code: Option<&str>,
        player: Player,
        poll_interval: Duration,
    ) -> Result<(Self, Classroom), ClientError> {
        let classroom = client.create(code, &player).await?;
        Ok((Self::start(client, classroom.code.clone(), player, poll_interval), classroom))
    }

    /// Checks reachability first so an offline server is reported as
    /// `Unreachable` rather than a confusing status error.
    pub async fn join(
        client: ClassroomClient,
        code: &str,
        player: Player,
        poll_interval: Duration,
    ) -> Result<(Self, Classroom), ClientError> {
        if !client.test_connection().await {
            return Err(ClientError::Unreachable(format!(
                "cannot connect to server at {}",
                client.base_url()
            )));
        }
        let classroom = client.join(code.trim(), &player).await?;
        Ok((Self::start(client, classroom.code.clone(), player, poll_interval), classroom))
    }

    fn start(client: ClassroomClient, code: String, player: Player, poll_interval: Duration) -> Self {
        let poller = spawn_poller(client.clone(), code.clone(), poll_interval);
        Self {
            client,
            code,
            player,
            poller,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn snapshots(&self) -> watch::Receiver<ClassroomSnapshot> {
        self.poller.subscribe()
    }

    pub async fn submit_score(&self, score: i64, successful_hashes: i64) -> Result<(), ClientError> {
        let entry = ScoreEntry {
            player_id: self.player.player_id.clone(),
            player_name: self.player.player_name.clone(),
            score,
            successful_hashes,
            timestamp: now_millis(),
        };
        self.client.submit_score(&self.code, &entry).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<ScoreEntry>, ClientError> {
        self.client.leaderboard(&self.code).await
    }

    pub async fn leave(self) -> Result<(), ClientError> {
        let Self {
            client,
            code,
            player,
            poller,
        } = self;
        poller.stop().await;
        client.leave(&code, &player.player_id).await
    }
}
