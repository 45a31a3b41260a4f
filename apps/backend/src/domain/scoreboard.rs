//! Per-classroom leaderboard: one entry per player, best first, bounded.

use serde::{Deserialize, Serialize};

use super::classroom::EpochMillis;

/// Maximum number of entries kept on a board.
pub const LEADERBOARD_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
    pub successful_hashes: i64,
    pub timestamp: EpochMillis,
}

/// What to do with a score whose classroom does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePolicy {
    /// Store it under the code anyway.
    #[default]
    Permissive,
    /// Reject it as not found.
    RequireClassroom,
}

impl std::str::FromStr for ScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "require_classroom" | "strict" => Ok(Self::RequireClassroom),
            other => Err(format!(
                "unknown score policy '{other}' (expected 'permissive' or 'require_classroom')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
    updated_at: EpochMillis,
}

impl ScoreBoard {
    pub fn new(now: EpochMillis) -> Self {
        Self {
            entries: Vec::new(),
            updated_at: now,
        }
    }

    /// Replace the player's previous entry (latest wins, not best), then
    /// re-rank and truncate.
    ///
    /// The sort is stable, so a resubmission lands after existing entries
    /// with the same score.
    pub fn submit(&mut self, entry: ScoreEntry, now: EpochMillis) {
        self.entries.retain(|e| e.player_id != entry.player_id);
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_LIMIT);
        self.updated_at = now;
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn updated_at(&self) -> EpochMillis {
        self.updated_at
    }

    pub fn is_idle(&self, now: EpochMillis, max_age_ms: i64) -> bool {
        now - self.updated_at > max_age_ms
    }
}
