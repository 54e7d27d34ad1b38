//! Process configuration from environment variables.

use std::time::Duration;

use thiserror::Error;

/// Environment variables read by `AppConfig::from_env`.
const ENV_BACKEND_URL: &str = "LAUNCHTRACK_BACKEND_URL";
const ENV_ANALYTICS_URL: &str = "LAUNCHTRACK_ANALYTICS_URL";
const ENV_DISPATCH_URL: &str = "LAUNCHTRACK_DISPATCH_URL";
const ENV_API_TOKEN: &str = "LAUNCHTRACK_API_TOKEN";
const ENV_REFRESH_SECS: &str = "LAUNCHTRACK_REFRESH_SECS";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Runtime configuration for the collaborator clients and the monitor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    /// Defaults to `backend_url`: in the original deployment the analytics
    /// routes are served by the same backend.
    pub analytics_url: String,
    /// Defaults to `backend_url` for the same reason.
    pub dispatch_url: String,
    pub api_token: Option<String>,
    pub refresh_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Env-independent core; tests drive this without touching the process
    /// environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = lookup(ENV_BACKEND_URL).unwrap_or_else(|| {
            tracing::warn!(
                "{} not set; using {}",
                ENV_BACKEND_URL,
                DEFAULT_BACKEND_URL
            );
            DEFAULT_BACKEND_URL.to_string()
        });
        let analytics_url = lookup(ENV_ANALYTICS_URL).unwrap_or_else(|| backend_url.clone());
        let dispatch_url = lookup(ENV_DISPATCH_URL).unwrap_or_else(|| backend_url.clone());
        let api_token = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty());

        let refresh_secs = match lookup(ENV_REFRESH_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: ENV_REFRESH_SECS,
                message: e.to_string(),
            })?,
            None => DEFAULT_REFRESH_SECS,
        };
        if refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_REFRESH_SECS,
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            backend_url,
            analytics_url,
            dispatch_url,
            api_token,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }
}
