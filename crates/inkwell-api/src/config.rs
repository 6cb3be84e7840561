//! Server configuration read from the environment.

use std::time::Duration;

use inkwell_core::config::{PlayerConfig, TransitionTimings};

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Player session configuration.
    pub player: PlayerConfig,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `SHEET_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let source_url = lookup("SHEET_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("SHEET_URL environment variable must be set".into()))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 3000_u16)?;

        let defaults = TransitionTimings::default();
        let transition = TransitionTimings {
            fade_out: millis_var(&lookup, "FADE_OUT_MS", defaults.fade_out)?,
            fade_in: millis_var(&lookup, "FADE_IN_MS", defaults.fade_in)?,
        };

        Ok(Self {
            player: PlayerConfig::new(source_url).with_transition(transition),
            host,
            port,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid ({raw:?}): {e}"))),
    }
}

fn millis_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, AppError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_var(lookup, key, default_ms).map(Duration::from_millis)
}
