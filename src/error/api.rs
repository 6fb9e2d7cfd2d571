//! API-level error types.
//!
//! A non-2xx response with a structured body becomes an [`ApiError`]. The
//! message is taken from the first present field among a small ordered list
//! of conventional error keys.

use std::fmt;

/// Ordered list of body fields the server may carry its message in.
const ERROR_KEYS: [&str; 3] = ["warning", "error", "detail"];

/// A non-2xx response from the board API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Message extracted from the response body
    pub message: String,
}

impl ApiError {
    /// Build an error from a status code and a parsed response body.
    ///
    /// Checks `warning`, then `error`, then `detail`; falls back to a
    /// generic `HTTP Error {status}` message when none is present.
    pub fn from_body(status: u16, body: &serde_json::Value) -> Self {
        let message = ERROR_KEYS
            .iter()
            .find_map(|key| {
                let value = body.get(key)?;
                match value {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                }
            })
            .unwrap_or_else(|| format!("HTTP Error {status}"));
        Self { status, message }
    }

    /// Build an error for a response whose body was not JSON at all.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            message: format!("HTTP Error {status}"),
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429 || self.status == 408
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
