use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MIN_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(String),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if the Gemini credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub llm_min_interval: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("GEMINI_API_KEY".to_string()))?;

        let llm_min_interval = match lookup("LLM_MIN_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    key: "LLM_MIN_INTERVAL_MS".to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => Duration::from_millis(DEFAULT_MIN_INTERVAL_MS),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    key: "PORT".to_string(),
                    reason: "must be a valid port number".to_string(),
                })?,
            None => 8080,
        };

        Ok(Config {
            gemini_api_key,
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            llm_min_interval,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
