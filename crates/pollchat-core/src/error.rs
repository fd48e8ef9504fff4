//! Client-facing errors raised by chat operations.

use thiserror::Error;

/// Result type for chat operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Every variant is a client error. An operation that returns one has not
/// touched the log or the presence registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatError {
    #[error("{0} required")]
    MissingParameter(&'static str),

    #[error("invalid message: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::MalformedPayload(err.to_string())
    }
}
