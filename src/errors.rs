// src/errors.rs

use thiserror::Error;

/// Fixed line shown in the transcript when the backend cannot be reached.
pub const CONNECT_FAILURE_TEXT: &str =
    "Oops! Could not connect to the backend. Please ensure it is running.";

/// Fallback used when a backend error response carries no message.
pub const UNKNOWN_BACKEND_ERROR: &str = "Unknown error";

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never produced a response (refused, timeout, DNS, ...).
    #[error("could not reach backend: {0}")]
    Connect(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Backend { status: u16, message: Option<String> },

    /// The response arrived but its body was not the expected JSON shape.
    #[error("malformed backend reply: {0}")]
    MalformedReply(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    /// Maps an error onto the text of the bot message shown to the user.
    ///
    /// Backend-reported failures surface the backend's own message;
    /// everything else (no response at all, or a body we could not make
    /// sense of) collapses into the fixed connectivity line. The detailed
    /// cause still goes to the diagnostic log, never to the transcript.
    pub fn user_facing_text(&self) -> String {
        match self {
            ChatError::Backend { message, .. } => format!(
                "Error from backend: {}",
                message.as_deref().unwrap_or(UNKNOWN_BACKEND_ERROR)
            ),
            _ => CONNECT_FAILURE_TEXT.to_string(),
        }
    }
}
