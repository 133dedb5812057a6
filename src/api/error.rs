//! Errors surfaced by the network collaborator.

use thiserror::Error;

/// Errors that can occur while listing users.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Base URL or path do not form a valid endpoint
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Could not reach the server or the transfer broke off
    #[error("Connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not a JSON array of users
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other failure, carried as its message
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Client(_) => "client",
            ApiError::InvalidEndpoint { .. } => "invalid_endpoint",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Connection(_) => "connection",
            ApiError::Status { .. } => "status",
            ApiError::Decode(_) => "decode",
            ApiError::Other(_) => "other",
        }
    }
}
