use tracing::info;

use super::classrooms::display_name;
use crate::domain::{now_millis, EpochMillis, ScoreEntry, ScorePolicy};
use crate::errors::domain::DomainError;
use crate::store::SessionStore;

/// Build a score entry from client input without rejecting anything.
///
/// Unlike roster entries, a blank `player_id` is stored as-is; the name gets
/// the same fallback and length cap as on join.
pub fn entry_from_input(
    player_id: &str,
    player_name: &str,
    score: i64,
    successful_hashes: i64,
    timestamp: Option<EpochMillis>,
) -> ScoreEntry {
    let player_id = player_id.trim();
    ScoreEntry {
        player_id: player_id.to_string(),
        player_name: display_name(player_id, player_name),
        score,
        successful_hashes,
        timestamp: timestamp.unwrap_or_else(now_millis),
    }
}

/// Leaderboard submission and lookup under a fixed unknown-classroom policy.
pub struct ScoreService {
    policy: ScorePolicy,
}

impl ScoreService {
    pub fn new(policy: ScorePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }

    /// Record `entry` as the player's current score in `code`.
    pub fn submit(
        &self,
        store: &SessionStore,
        code: &str,
        entry: ScoreEntry,
    ) -> Result<(), DomainError> {
        let code = code.trim();
        let player_name = entry.player_name.clone();
        let score = entry.score;
        store.submit_score(code, entry, self.policy, now_millis())?;
        info!(classroom = %code, player_name = %player_name, score, "score submitted");
        Ok(())
    }

    pub fn leaderboard(&self, store: &SessionStore, code: &str) -> Vec<ScoreEntry> {
        store.leaderboard(code.trim())
    }
}

impl Default for ScoreService {
    fn default() -> Self {
        Self::new(ScorePolicy::default())
    }
}
