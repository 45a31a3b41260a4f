use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Milliseconds since the Unix epoch, the unit the browser client uses.
pub type EpochMillis = i64;

pub fn now_millis() -> EpochMillis {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as EpochMillis
}

/// A roster member. Identity is whatever id the client generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    pub player_name: String,
}

impl Player {
    pub fn new(player_id: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub code: String,
    pub players: Vec<Player>,
    pub created_at: EpochMillis,
}

impl Classroom {
    /// New classroom whose only member is `creator`.
    pub fn new(code: impl Into<String>, creator: Player, created_at: EpochMillis) -> Self {
        Self {
            code: code.into(),
            players: vec![creator],
            created_at,
        }
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.player_id == player_id)
    }

    /// Append `player` unless its id is already present. Returns whether the
    /// roster changed.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.has_player(&player.player_id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Remove every roster entry with `player_id`. Returns whether any was removed.
    pub fn remove_player(&mut self, player_id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.player_id != player_id);
        self.players.len() != before
    }

    /// Empty and older than `max_age_ms` at `now`.
    pub fn is_stale(&self, now: EpochMillis, max_age_ms: i64) -> bool {
        self.players.is_empty() && now - self.created_at > max_age_ms
    }
}
