//! Error types for slideshow playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Backend request failed (network error or non-success status)
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// Backend answered with a body we could not interpret
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// Surface rejected an update (e.g. image could not be written)
    #[error("Surface error: {0}")]
    Surface(String),

    /// Engine was started twice within one session
    #[error("Engine already started")]
    AlreadyStarted,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
