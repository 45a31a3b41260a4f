use std::str::FromStr;

use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// Output shape of the server log, chosen with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers.
    #[default]
    Json,
    /// Human-readable lines for a terminal during a classroom session.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown LOG_FORMAT '{other}'")),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// an unknown `LOG_FORMAT` falls back to JSON with a warning.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (format, rejected) = match std::env::var("LOG_FORMAT") {
        Ok(raw) => match raw.parse::<LogFormat>() {
            Ok(format) => (format, None),
            Err(e) => (LogFormat::Json, Some(e)),
        },
        Err(_) => (LogFormat::default(), None),
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .json(),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).compact())
            .init(),
    }

    if let Some(reason) = rejected {
        warn!(%reason, "falling back to JSON logs");
    }
}
