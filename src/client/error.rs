//! Client error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to whoever started the session (CLI or web UI).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server location or the user input is missing or invalid.
    /// Raised before any connection is attempted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server could not be reached or went away mid-session.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected the call (unknown tool, bad arguments).
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// The session, handshake included, did not finish within the configured limit.
    #[error("Session timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered but the answer carried no count.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an invocation error.
    pub fn invocation(msg: impl Into<String>) -> Self {
        Self::Invocation(msg.into())
    }

    /// Create an unexpected response error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }
}

impl From<rmcp::ServiceError> for ClientError {
    fn from(error: rmcp::ServiceError) -> Self {
        match error {
            rmcp::ServiceError::McpError(data) => Self::Invocation(data.message.into_owned()),
            other => Self::Connection(other.to_string()),
        }
    }
}
