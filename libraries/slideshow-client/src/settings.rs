//! Config endpoints.

use crate::client::{endpoint, send, text};
use crate::error::Result;
use reqwest::Client;
use slideshow_playback::ConfigKey;
use tracing::debug;

/// Client for the config scalars.
pub struct SettingsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> SettingsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Raw text of a config scalar, trimmed. Parsing is left to the caller.
    pub async fn value(&self, key: ConfigKey) -> Result<String> {
        let url = endpoint(self.base_url, config_path(key))?;
        debug!(url = %url, ?key, "Fetching config value");

        text(send(self.http.get(url)).await?).await
    }
}

/// Path segments of the endpoint serving `key`
///
/// The weather flag lives under `/api/weather`, next to the weather data.
pub fn config_path(key: ConfigKey) -> &'static [&'static str] {
    match key {
        ConfigKey::SlideshowInterval => &["api", "config", "interval", "slideshow"],
        ConfigKey::RefreshInterval => &["api", "config", "interval", "refresh"],
        ConfigKey::ShowHideButton => &["api", "config", "show-hide-button"],
        ConfigKey::RandomSlideshow => &["api", "config", "random-slideshow"],
        ConfigKey::PreloadImages => &["api", "config", "preload-images"],
        ConfigKey::WeatherEnabled => &["api", "weather"],
    }
}
