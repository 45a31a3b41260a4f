//! Classroom domain types and pure scoreboard rules.

pub mod classroom;
pub mod scoreboard;

pub use classroom::{now_millis, Classroom, EpochMillis, Player};
pub use scoreboard::{ScoreBoard, ScoreEntry, ScorePolicy, LEADERBOARD_LIMIT};
