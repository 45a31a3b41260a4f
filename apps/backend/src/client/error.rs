use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout.
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("classroom code conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned {0}: {1}")]
    Status(u16, String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Unreachable(e.to_string())
        }
    }
}
