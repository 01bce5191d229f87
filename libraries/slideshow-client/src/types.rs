//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://frame.local:8080`
    pub url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
