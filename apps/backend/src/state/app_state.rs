use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::ScorePolicy;
use crate::services::{ClassroomService, ScoreService};
use crate::store::SessionStore;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Shared with the reap job.
    pub store: Arc<SessionStore>,
    pub score_policy: ScorePolicy,
}

impl AppState {
    pub fn new(store: Arc<SessionStore>, score_policy: ScorePolicy) -> Self {
        Self {
            store,
            score_policy,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Arc::new(SessionStore::new()), config.score_policy)
    }

    pub fn classrooms(&self) -> ClassroomService {
        ClassroomService::new()
    }

    pub fn scores(&self) -> ScoreService {
        ScoreService::new(self.score_policy)
    }

    /// Fresh empty store with the default score policy; handy for tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(SessionStore::new()), ScorePolicy::default())
    }
}
