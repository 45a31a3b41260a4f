//! Process-wide volatile state: classrooms and their score boards.

pub mod session;

pub use session::{ReapReport, SessionStore};
