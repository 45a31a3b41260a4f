use std::env;
use std::time::Duration;

use crate::domain::ScorePolicy;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REAP_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_REAP_MAX_AGE_SECS: u64 = 60 * 60;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How often the reap job sweeps.
    pub reap_interval: Duration,
    /// Minimum age of an empty classroom (or idle orphan board) before it is reaped.
    pub reap_max_age: Duration,
    pub score_policy: ScorePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            reap_interval: Duration::from_secs(DEFAULT_REAP_INTERVAL_SECS),
            reap_max_age: Duration::from_secs(DEFAULT_REAP_MAX_AGE_SECS),
            score_policy: ScorePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Read from the process environment.
    ///
    /// - `BACKEND_HOST` (default `0.0.0.0`)
    /// - `PORT`, then `BACKEND_PORT` (default `3000`)
    /// - `REAP_INTERVAL_SECS`, `REAP_MAX_AGE_SECS` (default one hour each)
    /// - `SCORE_POLICY`: `permissive` or `require_classroom`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("PORT").or_else(|| lookup("BACKEND_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            None => defaults.port,
        };

        let reap_interval = secs_var(&lookup, "REAP_INTERVAL_SECS")?.unwrap_or(defaults.reap_interval);
        if reap_interval.is_zero() {
            return Err(AppError::config("REAP_INTERVAL_SECS must be greater than zero"));
        }
        let reap_max_age = secs_var(&lookup, "REAP_MAX_AGE_SECS")?.unwrap_or(defaults.reap_max_age);

        let score_policy = match lookup("SCORE_POLICY") {
            Some(raw) => raw.parse::<ScorePolicy>().map_err(AppError::config)?,
            None => defaults.score_policy,
        };

        Ok(Self {
            host,
            port,
            reap_interval,
            reap_max_age,
            score_policy,
        })
    }
}

fn secs_var<F>(lookup: &F, key: &str) -> Result<Option<Duration>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| AppError::config(format!("{key} must be whole seconds, got '{raw}'")))
        })
        .transpose()
}
