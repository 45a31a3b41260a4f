use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;

use crate::domain::{Classroom, EpochMillis, Player, ScoreBoard, ScoreEntry, ScorePolicy};
use crate::errors::domain::{ConflictKind, DomainError};

/// What a reap sweep removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReapReport {
    /// Codes of empty, stale classrooms that were deleted with their boards.
    pub classrooms: Vec<String>,
    /// Codes of idle boards that had no classroom.
    pub orphan_boards: Vec<String>,
}

impl ReapReport {
    pub fn is_empty(&self) -> bool {
        self.classrooms.is_empty() && self.orphan_boards.is_empty()
    }
}

#[derive(Debug, Default)]
struct Inner {
    classrooms: HashMap<String, Classroom>,
    boards: HashMap<String, ScoreBoard>,
}

/// In-memory store owning both keyed collections.
///
/// Every method takes the lock exactly once, so each call is atomic with
/// respect to every other, including [`SessionStore::reap`].
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new classroom and reset its board. Fails if the code is taken,
    /// leaving the existing classroom untouched.
    pub fn insert_classroom(
        &self,
        classroom: Classroom,
        now: EpochMillis,
    ) -> Result<Classroom, DomainError> {
        let mut inner = self.inner.write();
        if inner.classrooms.contains_key(&classroom.code) {
            return Err(DomainError::conflict(
                ConflictKind::ClassroomCode,
                format!("Classroom {} already exists", classroom.code),
            ));
        }
        inner
            .boards
            .insert(classroom.code.clone(), ScoreBoard::new(now));
        inner
            .classrooms
            .insert(classroom.code.clone(), classroom.clone());
        Ok(classroom)
    }

    pub fn classroom(&self, code: &str) -> Option<Classroom> {
        self.inner.read().classrooms.get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.inner.read().classrooms.contains_key(code)
    }

    /// Add `player` to the roster unless already present. Returns the
    /// classroom after the call and whether the roster changed.
    pub fn add_player(&self, code: &str, player: Player) -> Result<(Classroom, bool), DomainError> {
        let mut inner = self.inner.write();
        let classroom = inner
            .classrooms
            .get_mut(code)
            .ok_or_else(|| DomainError::classroom_not_found(code))?;
        let added = classroom.add_player(player);
        Ok((classroom.clone(), added))
    }

    /// Remove `player_id` from the roster if the classroom exists. Returns
    /// whether anything was removed.
    pub fn remove_player(&self, code: &str, player_id: &str) -> bool {
        self.inner
            .write()
            .classrooms
            .get_mut(code)
            .map(|classroom| classroom.remove_player(player_id))
            .unwrap_or(false)
    }

    pub fn submit_score(
        &self,
        code: &str,
        entry: ScoreEntry,
        policy: ScorePolicy,
        now: EpochMillis,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write();
        if policy == ScorePolicy::RequireClassroom && !inner.classrooms.contains_key(code) {
            return Err(DomainError::classroom_not_found(code));
        }
        inner
            .boards
            .entry(code.to_string())
            .or_insert_with(|| ScoreBoard::new(now))
            .submit(entry, now);
        Ok(())
    }

    /// Ranked board for `code`; empty when none exists.
    pub fn leaderboard(&self, code: &str) -> Vec<ScoreEntry> {
        self.inner
            .read()
            .boards
            .get(code)
            .map(|board| board.entries().to_vec())
            .unwrap_or_default()
    }

    /// Delete every empty classroom older than `max_age` (and its board), and
    /// every board without a classroom that has been idle longer than `max_age`.
    pub fn reap(&self, now: EpochMillis, max_age: Duration) -> ReapReport {
        let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        let mut inner = self.inner.write();
        let Inner { classrooms, boards } = &mut *inner;

        let mut report = ReapReport::default();

        classrooms.retain(|code, classroom| {
            if classroom.is_stale(now, max_age_ms) {
                report.classrooms.push(code.clone());
                false
            } else {
                true
            }
        });
        for code in &report.classrooms {
            boards.remove(code);
        }

        boards.retain(|code, board| {
            if !classrooms.contains_key(code) && board.is_idle(now, max_age_ms) {
                report.orphan_boards.push(code.clone());
                false
            } else {
                true
            }
        });

        report.classrooms.sort();
        report.orphan_boards.sort();
        report
    }

    pub fn classroom_count(&self) -> usize {
        self.inner.read().classrooms.len()
    }

    pub fn board_count(&self) -> usize {
        self.inner.read().boards.len()
    }
}
