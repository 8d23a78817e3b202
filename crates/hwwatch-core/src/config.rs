//! Environment-sourced configuration.
//!
//! Three values are required (`PRACTICUM_TOKEN`, `TELEGRAM_TOKEN`,
//! `TELEGRAM_CHAT_ID`); everything else has a default. An empty variable
//! counts as missing.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{HwWatchError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const REQUIRED: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Runtime configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(HwWatchError::MissingConfig(missing));
        }

        let required = |key: &'static str| get(key).ok_or(HwWatchError::MissingConfig(vec![key]));

        Ok(Self {
            practicum_token: required("PRACTICUM_TOKEN")?,
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into()),
            retry_interval: seconds(get("RETRY_TIME"), "RETRY_TIME", DEFAULT_RETRY_SECS)?,
            request_timeout: seconds(
                get("REQUEST_TIMEOUT"),
                "REQUEST_TIMEOUT",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn seconds(raw: Option<String>, key: &str, default: u64) -> Result<Duration> {
    match raw {
        None => Ok(Duration::from_secs(default)),
        Some(value) => {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|e| HwWatchError::config(format!("{key}={value:?}: {e}")))?;
            if secs == 0 {
                return Err(HwWatchError::config(format!("{key} must be at least 1 second")));
            }
            Ok(Duration::from_secs(secs))
        }
    }
}

/// Logging settings. Read separately from [`Config`] so the log sinks exist
/// before the required variables are checked.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dir = get("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let filter = get("RUST_LOG")
            .or_else(|| get("LOG_LEVEL").map(|level| level.to_lowercase()))
            .unwrap_or_else(|| "info".to_string());
        Self { dir, filter }
    }
}
