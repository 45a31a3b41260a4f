use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ClientError;
use crate::domain::{Classroom, Player, ScoreEntry};
use crate::errors::ErrorCode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    player_id: &'a str,
    player_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaveBody<'a> {
    code: &'a str,
    player_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody<'a> {
    code: &'a str,
    #[serde(flatten)]
    entry: &'a ScoreEntry,
}

#[derive(Deserialize)]
struct ClassroomEnvelope {
    classroom: Classroom,
}

#[derive(Deserialize)]
struct PlayersEnvelope {
    #[serde(default)]
    players: Vec<Player>,
}

#[derive(Deserialize)]
struct LeaderboardEnvelope {
    #[serde(default)]
    leaderboard: Vec<ScoreEntry>,
}

#[derive(Deserialize)]
struct Ack {}

#[derive(Deserialize)]
struct ProblemBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ClassroomClient {
    http: reqwest::Client,
    base: Url,
    base_url: String,
}

impl ClassroomClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_http(http, base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url));
        }
        Ok(Self {
            http,
            base,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment,
    /// so a code containing `/` or `?` cannot reach another route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/test` answered with a success status.
    pub async fn test_connection(&self) -> bool {
        let url = match self.endpoint(&["api", "test"]) {
            Ok(url) => url,
            Err(_) => return false,
        };
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, base_url = %self.base_url, "connection test failed");
                false
            }
        }
    }

    pub async fn create(
        &self,
        code: Option<&str>,
        creator: &Player,
    ) -> Result<Classroom, ClientError> {
        let body = MembershipBody {
            code,
            player_id: &creator.player_id,
            player_name: &creator.player_name,
        };
        let envelope: ClassroomEnvelope = self
            .send(self.http.post(self.endpoint(&["api", "classroom", "create"])?).json(&body))
            .await?;
        Ok(envelope.classroom)
    }

    pub async fn join(&self, code: &str, player: &Player) -> Result<Classroom, ClientError> {
        let body = MembershipBody {
            code: Some(code),
            player_id: &player.player_id,
            player_name: &player.player_name,
        };
        let envelope: ClassroomEnvelope = self
            .send(self.http.post(self.endpoint(&["api", "classroom", "join"])?).json(&body))
            .await?;
        Ok(envelope.classroom)
    }

    pub async fn leave(&self, code: &str, player_id: &str) -> Result<(), ClientError> {
        let body = LeaveBody { code, player_id };
        let _: Ack = self
            .send(self.http.post(self.endpoint(&["api", "classroom", "leave"])?).json(&body))
            .await?;
        Ok(())
    }

    pub async fn players(&self, code: &str) -> Result<Vec<Player>, ClientError> {
        let envelope: PlayersEnvelope = self
            .send(self.http.get(self.endpoint(&["api", "classroom", "players", code])?))
            .await?;
        Ok(envelope.players)
    }

    pub async fn submit_score(&self, code: &str, entry: &ScoreEntry) -> Result<(), ClientError> {
        let body = ScoreBody { code, entry };
        let _: Ack = self
            .send(self.http.post(self.endpoint(&["api", "classroom", "score"])?).json(&body))
            .await?;
        Ok(())
    }

    pub async fn leaderboard(&self, code: &str) -> Result<Vec<ScoreEntry>, ClientError> {
        let envelope: LeaderboardEnvelope = self
            .send(self.http.get(self.endpoint(&["api", "classroom", "leaderboard", code])?))
            .await?;
        Ok(envelope.leaderboard)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(error_from_response(status, &text))
    }
}

fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let problem = serde_json::from_str::<ProblemBody>(body).ok();
    let code = problem.as_ref().and_then(|p| p.code.clone());
    let detail = problem
        .and_then(|p| p.detail.or(p.error))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound(detail);
    }
    if code.as_deref() == Some(ErrorCode::ClassroomCodeConflict.as_str()) {
        return ClientError::Conflict(detail);
    }
    ClientError::Status(status.as_u16(), detail)
}
