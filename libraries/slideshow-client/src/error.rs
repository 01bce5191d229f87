//! Error types for the slideshow backend client.

use slideshow_playback::PlaybackError;
use thiserror::Error;

/// Errors that can occur when talking to the slideshow backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Backend is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for PlaybackError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ParseError(message) => PlaybackError::InvalidResponse(message),
            other => PlaybackError::Backend(other.to_string()),
        }
    }
}
