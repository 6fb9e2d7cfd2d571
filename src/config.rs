//! Client configuration.
//!
//! Resolved once at startup from environment variables; treated as
//! read-only afterwards.

use std::path::PathBuf;

/// Default API root when `QBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the board API, including the version prefix
    pub api_base_url: String,
    /// `tracing` filter directive (from `QBOARD_LOG`)
    pub log_filter: String,
    /// Directory the log file is written to; `None` disables file logging
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_filter: "qboard=info".to_string(),
            log_dir: dirs::data_local_dir().map(|dir| dir.join("qboard")),
        }
    }
}

impl Config {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("QBOARD_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(filter) = std::env::var("QBOARD_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }
        config
    }

    /// Override the API base URL (used by tests).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Disable file logging (used by tests).
    pub fn without_log_file(mut self) -> Self {
        self.log_dir = None;
        self
    }
}
