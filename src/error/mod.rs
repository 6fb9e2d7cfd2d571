//! Unified error handling for the board client.
//!
//! The taxonomy follows the three failure classes the client distinguishes:
//!
//! - [`TransportError`]: the request never completed (connection, timeout)
//! - [`ApiError`]: the server answered with a non-2xx structured error
//! - [`StateError`]: a rendering-contract violation (missing sub-view),
//!   logged and self-healed, never user-fatal
//!
//! [`BoardError`] consolidates them (plus response-decoding failures) so
//! async tasks can report one error type back to the UI loop. `color-eyre`
//! is used only at the binary edge in `main`.

mod api;
mod state;

pub use api::ApiError;
pub use state::StateError;

pub use crate::traits::TransportError;

/// Result alias used throughout the client.
pub type BoardResult<T> = Result<T, BoardError>;

/// Any failure a board operation can report.
#[derive(Debug, Clone)]
pub enum BoardError {
    /// The request never produced a response
    Transport(TransportError),
    /// The server answered with an error status
    Api(ApiError),
    /// A 2xx response body could not be decoded
    Decode(String),
    /// A rendering-contract violation
    State(StateError),
}

impl BoardError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            BoardError::Transport(err) => match err {
                TransportError::ConnectionFailed(_) => {
                    "Unable to reach the server. Check that it is running.".to_string()
                }
                TransportError::Timeout(_) => {
                    "The server took too long to respond. Try again.".to_string()
                }
                _ => format!("Network error: {err}"),
            },
            BoardError::Api(err) => err.message.clone(),
            BoardError::Decode(_) => "Received an invalid response from the server.".to_string(),
            BoardError::State(err) => format!("Display glitch: {err}"),
        }
    }

    /// Short code for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            BoardError::Transport(_) => "E_TRANSPORT",
            BoardError::Api(_) => "E_API",
            BoardError::Decode(_) => "E_DECODE",
            BoardError::State(_) => "E_STATE",
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BoardError::Transport(err) => err.is_retryable(),
            BoardError::Api(err) => err.is_retryable(),
            BoardError::Decode(_) => false,
            BoardError::State(_) => false,
        }
    }
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::Transport(err) => write!(f, "{err}"),
            BoardError::Api(err) => write!(f, "{err}"),
            BoardError::Decode(msg) => write!(f, "decode error: {msg}"),
            BoardError::State(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<TransportError> for BoardError {
    fn from(err: TransportError) -> Self {
        BoardError::Transport(err)
    }
}

impl From<ApiError> for BoardError {
    fn from(err: ApiError) -> Self {
        BoardError::Api(err)
    }
}

impl From<StateError> for BoardError {
    fn from(err: StateError) -> Self {
        BoardError::State(err)
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let transport: BoardError = TransportError::Timeout("30s".to_string()).into();
        let api: BoardError = ApiError::from_status(500).into();
        let state: BoardError = StateError::missing_sub_view("todo:1", "reply").into();

        assert_eq!(transport.error_code(), "E_TRANSPORT");
        assert_eq!(api.error_code(), "E_API");
        assert_eq!(state.error_code(), "E_STATE");

        assert!(transport.is_retryable());
        assert!(api.is_retryable());
        assert!(!state.is_retryable());
    }

    #[test]
    fn test_user_message_connection_failed() {
        let err: BoardError = TransportError::ConnectionFailed("refused".to_string()).into();
        assert!(err.user_message().contains("reach the server"));
    }

    #[test]
    fn test_user_message_api_passthrough() {
        let err: BoardError = ApiError {
            status: 403,
            message: "Wrong password.".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Wrong password.");
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: BoardError = json_err.into();
        assert_eq!(err.error_code(), "E_DECODE");
        assert!(!err.is_retryable());
    }
}
