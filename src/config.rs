//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default request timeout; timed-out calls are retryable upstream errors.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dashboard backend base URL (including the API prefix)
    pub api_base_url: String,
    /// Path of the persisted credential slot
    pub token_path: PathBuf,
    /// Bound on every network call, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            token_path: PathBuf::from("gramdash_token.json"),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default, so a bare environment works against a
    /// local backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("DASHBOARD_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            token_path: env::var("DASHBOARD_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_path()),
            request_timeout_secs: match env::var("DASHBOARD_REQUEST_TIMEOUT_SECS") {
                Ok(v) => v
                    .parse()
                    .map_err(|_| ConfigError::Invalid("DASHBOARD_REQUEST_TIMEOUT_SECS"))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        })
    }
}

/// Default credential slot location: `$HOME/.gramdash/token.json`, or a
/// relative path when HOME is unset (containers, CI).
fn default_token_path() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".gramdash").join("token.json"),
        Err(_) => PathBuf::from("gramdash_token.json"),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {0}")]
    Invalid(&'static str),
}
