use tracing::{debug, info, warn};

use crate::domain::{now_millis, Classroom, Player};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::SessionStore;
use crate::utils::join_code::{generate_join_code, is_valid_join_code};

/// How many server-generated codes to try before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Longest player name kept; longer names are cut to this many characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 64;

/// Build a roster entry from untrusted client input.
///
/// A blank name falls back to `Player_` plus the last six characters of the
/// id, the same default the browser uses.
pub fn player_from_input(player_id: &str, player_name: &str) -> Result<Player, DomainError> {
    let player_id = player_id.trim();
    if player_id.is_empty() {
        return Err(DomainError::validation("playerId is required"));
    }
    Ok(Player::new(player_id, display_name(player_id, player_name)))
}

/// Trimmed, length-capped name with the id-suffix fallback for blanks.
pub(crate) fn display_name(player_id: &str, player_name: &str) -> String {
    let player_name = player_name.trim();
    if player_name.is_empty() {
        let chars: Vec<char> = player_id.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
        format!("Player_{tail}")
    } else {
        player_name.chars().take(MAX_PLAYER_NAME_CHARS).collect()
    }
}

/// Classroom lifecycle: create, join, leave, roster lookup.
pub struct ClassroomService;

impl ClassroomService {
    pub fn new() -> Self {
        Self
    }

    /// Create a classroom with `creator` as its only player.
    ///
    /// A client-chosen `code` must be six digits and is not retried on
    /// collision; without one, fresh codes are drawn until one is free.
    pub fn create(
        &self,
        store: &SessionStore,
        code: Option<&str>,
        creator: Player,
    ) -> Result<Classroom, DomainError> {
        self.create_with(store, code, creator, generate_join_code)
    }

    pub fn create_with<G>(
        &self,
        store: &SessionStore,
        code: Option<&str>,
        creator: Player,
        mut next_code: G,
    ) -> Result<Classroom, DomainError>
    where
        G: FnMut() -> String,
    {
        match code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => {
                if !is_valid_join_code(code) {
                    return Err(DomainError::validation(format!(
                        "Classroom code must be 6 digits, got '{code}'"
                    )));
                }
                self.insert(store, code.to_string(), creator)
            }
            None => {
                for attempt in 1..=MAX_CODE_ATTEMPTS {
                    match self.insert(store, next_code(), creator.clone()) {
                        Err(DomainError::Conflict(ConflictKind::ClassroomCode, detail)) => {
                            debug!(attempt, %detail, "generated classroom code collided");
                        }
                        other => return other,
                    }
                }
                warn!(attempts = MAX_CODE_ATTEMPTS, "no free classroom code found");
                Err(DomainError::conflict(
                    ConflictKind::ClassroomCode,
                    format!("No free classroom code after {MAX_CODE_ATTEMPTS} attempts"),
                ))
            }
        }
    }

    fn insert(
        &self,
        store: &SessionStore,
        code: String,
        creator: Player,
    ) -> Result<Classroom, DomainError> {
        let now = now_millis();
        let classroom = store.insert_classroom(Classroom::new(code, creator, now), now)?;
        info!(
            classroom = %classroom.code,
            player_id = %classroom.players[0].player_id,
            player_name = %classroom.players[0].player_name,
            "classroom created"
        );
        Ok(classroom)
    }

    /// Join `code`. Joining again with the same player id changes nothing
    /// and still returns the classroom.
    pub fn join(
        &self,
        store: &SessionStore,
        code: &str,
        player: Player,
    ) -> Result<Classroom, DomainError> {
        let code = code.trim();
        let player_id = player.player_id.clone();
        let (classroom, added) = store.add_player(code, player)?;
        if added {
            info!(classroom = %code, player_id = %player_id, roster = classroom.players.len(), "player joined");
        } else {
            debug!(classroom = %code, player_id = %player_id, "player already in classroom");
        }
        Ok(classroom)
    }

    /// Leave `code`. Unknown classrooms and players are ignored.
    pub fn leave(&self, store: &SessionStore, code: &str, player_id: &str) {
        let code = code.trim();
        if store.remove_player(code, player_id.trim()) {
            info!(classroom = %code, player_id = %player_id, "player left");
        }
    }

    pub fn get(&self, store: &SessionStore, code: &str) -> Result<Classroom, DomainError> {
        let code = code.trim();
        store
            .classroom(code)
            .ok_or_else(|| DomainError::classroom_not_found(code))
    }

    pub fn list_players(
        &self,
        store: &SessionStore,
        code: &str,
    ) -> Result<Vec<Player>, DomainError> {
        self.get(store, code).map(|classroom| classroom.players)
    }
}

impl Default for ClassroomService {
    fn default() -> Self {
        Self::new()
    }
}
