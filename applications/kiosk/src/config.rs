/// Kiosk configuration
use crate::error::{KioskError, Result};
use serde::{Deserialize, Serialize};
use slideshow_client::{ClientConfig, SlideshowClient};
use slideshow_playback::{QueryOverrides, ScreenSize, SessionOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Config file read when no path is given and it exists
pub const DEFAULT_CONFIG_FILE: &str = "kiosk.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KioskConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_display")]
    pub display: DisplaySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Backend base URL; a query string here acts as the page's query string
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// File the current image is written to, for an external viewer
    #[serde(default)]
    pub image_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Config overrides, e.g. `SLIDESHOW_INTERVAL=5&WEATHER_ENABLED=true`
    #[serde(default)]
    pub query: String,

    /// Drop writes from renders superseded by a newer tick
    #[serde(default)]
    pub suppress_stale_renders: bool,
}

impl KioskConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `kiosk.toml` in the
    /// working directory is used if present. `KIOSK_*` environment variables
    /// override file values (`KIOSK_BACKEND__URL`, `KIOSK_DISPLAY__WIDTH`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(KioskError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("KIOSK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Apply command line overrides
    #[must_use]
    pub fn with_overrides(mut self, backend_url: Option<String>, query: Option<String>) -> Self {
        if let Some(url) = backend_url {
            self.backend.url = url;
        }
        if let Some(query) = query {
            self.playback.query = query;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.url.trim();
        if url.is_empty() {
            return Err(KioskError::Config(
                "Backend URL is required (set KIOSK_BACKEND__URL or --backend-url)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(KioskError::Config(format!(
                "Backend URL must start with http:// or https://, got {:?}",
                url
            )));
        }
        Url::parse(url).map_err(|e| KioskError::Config(format!("Invalid backend URL: {}", e)))?;

        if self.display.width == 0 || self.display.height == 0 {
            return Err(KioskError::Config(format!(
                "Screen size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(KioskError::Config(
                "Backend timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Client settings, with any query string removed from the URL
    pub fn client_config(&self) -> ClientConfig {
        let url = match Url::parse(self.backend.url.trim()) {
            Ok(mut url) => {
                url.set_query(None);
                url.set_fragment(None);
                url.to_string()
            }
            Err(_) => self.backend.url.clone(),
        };
        ClientConfig::new(url).with_timeout(Duration::from_secs(self.backend.timeout_secs))
    }

    /// HTTP client for the configured backend
    pub fn backend_client(&self) -> Result<SlideshowClient> {
        Ok(SlideshowClient::new(self.client_config())?)
    }

    pub fn screen_size(&self) -> ScreenSize {
        ScreenSize::new(self.display.width, self.display.height)
    }

    /// Session options
    ///
    /// The configured query wins; otherwise the backend URL's own query
    /// string is used, like a browser page opened with parameters.
    pub fn session_options(&self) -> SessionOptions {
        let overrides = if self.playback.query.trim().is_empty() {
            Url::parse(self.backend.url.trim())
                .map(|url| QueryOverrides::from_url(&url))
                .unwrap_or_default()
        } else {
            QueryOverrides::parse(self.playback.query.trim())
        };

        SessionOptions {
            overrides,
            suppress_stale_renders: self.playback.suppress_stale_renders,
        }
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            display: default_display(),
            playback: default_playback(),
        }
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        url: default_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_display() -> DisplaySettings {
    DisplaySettings {
        width: default_width(),
        height: default_height(),
        image_output: None,
    }
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings::default()
}
