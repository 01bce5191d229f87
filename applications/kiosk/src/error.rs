/// Kiosk error types
use slideshow_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KioskError>;

#[derive(Debug, Error)]
pub enum KioskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend client error: {0}")]
    Client(#[from] ClientError),
}

impl From<config::ConfigError> for KioskError {
    fn from(err: config::ConfigError) -> Self {
        KioskError::Config(err.to_string())
    }
}
