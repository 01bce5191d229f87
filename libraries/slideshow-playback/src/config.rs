//! Run-time configuration resolution
//!
//! Each value is resolved independently with this precedence:
//! 1. Query-string override, if present and parseable
//! 2. Backend config endpoint, if it answers with a parseable value
//! 3. Hardcoded default
//!
//! Failures are never surfaced to the user; they are logged and the next
//! source is tried.

use crate::backend::SlideshowBackend;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default slideshow interval in seconds
pub const DEFAULT_SLIDESHOW_INTERVAL_SECS: u64 = 30;

/// Default page refresh interval in minutes
pub const DEFAULT_REFRESH_INTERVAL_MINS: u64 = 180;

/// Config scalars known to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    SlideshowInterval,
    RefreshInterval,
    ShowHideButton,
    RandomSlideshow,
    PreloadImages,
    WeatherEnabled,
}

impl ConfigKey {
    /// Name of the query-string parameter that overrides this key, if any
    pub fn query_name(self) -> Option<&'static str> {
        match self {
            ConfigKey::SlideshowInterval => Some("SLIDESHOW_INTERVAL"),
            ConfigKey::ShowHideButton => Some("SHOW_HIDE_BUTTON"),
            ConfigKey::RandomSlideshow => Some("RANDOM_SLIDESHOW"),
            ConfigKey::WeatherEnabled => Some("WEATHER_ENABLED"),
            ConfigKey::RefreshInterval | ConfigKey::PreloadImages => None,
        }
    }
}

/// Query-string overrides (`?SLIDESHOW_INTERVAL=5&WEATHER_ENABLED=false`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    values: HashMap<String, String>,
}

impl QueryOverrides {
    /// Parse a query string, with or without the leading `?`
    ///
    /// When a parameter repeats, the first occurrence wins.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut values = HashMap::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            values
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    /// Take the overrides from a full URL
    pub fn from_url(url: &Url) -> Self {
        url.query().map(Self::parse).unwrap_or_default()
    }

    /// Raw override for a key
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        key.query_name()
            .and_then(|name| self.values.get(name))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A value that can be read from override or backend text
trait ConfigValue: Sized + Copy + std::fmt::Debug {
    fn parse_value(raw: &str) -> Option<Self>;
}

impl ConfigValue for bool {
    fn parse_value(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_matches('"');
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl ConfigValue for u64 {
    /// Intervals must be positive; zero would mean a busy timer
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim()
            .trim_matches('"')
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
    }
}

/// Resolved configuration, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideshowConfig {
    /// Seconds between slideshow ticks (default: 30)
    pub slideshow_interval_secs: u64,

    /// Minutes between forced reloads (default: 180)
    pub refresh_interval_mins: u64,

    /// Warm the backend cache for the next resource (default: false)
    pub preload_enabled: bool,

    /// Skip the weekly playlist and play random resources (default: false)
    pub random_only: bool,

    /// Show the hide button (default: false)
    pub hide_button_visible: bool,

    /// Show the weather overlay (default: false)
    pub weather_enabled: bool,
}

impl SlideshowConfig {
    pub fn slideshow_interval(&self) -> Duration {
        Duration::from_secs(self.slideshow_interval_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_mins.saturating_mul(60))
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slideshow_interval_secs: DEFAULT_SLIDESHOW_INTERVAL_SECS,
            refresh_interval_mins: DEFAULT_REFRESH_INTERVAL_MINS,
            preload_enabled: false,
            random_only: false,
            hide_button_visible: false,
            weather_enabled: false,
        }
    }
}

/// Resolves config values from overrides, backend and defaults
pub struct ConfigResolver<'a> {
    backend: &'a dyn SlideshowBackend,
    overrides: &'a QueryOverrides,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(backend: &'a dyn SlideshowBackend, overrides: &'a QueryOverrides) -> Self {
        Self { backend, overrides }
    }

    /// Resolve every key concurrently; one key failing never affects another
    pub async fn resolve_all(&self) -> SlideshowConfig {
        let defaults = SlideshowConfig::default();

        let (
            slideshow_interval_secs,
            refresh_interval_mins,
            preload_enabled,
            random_only,
            hide_button_visible,
            weather_enabled,
        ) = tokio::join!(
            self.resolve(ConfigKey::SlideshowInterval, defaults.slideshow_interval_secs),
            self.resolve(ConfigKey::RefreshInterval, defaults.refresh_interval_mins),
            self.resolve(ConfigKey::PreloadImages, defaults.preload_enabled),
            self.resolve(ConfigKey::RandomSlideshow, defaults.random_only),
            self.resolve(ConfigKey::ShowHideButton, defaults.hide_button_visible),
            self.resolve(ConfigKey::WeatherEnabled, defaults.weather_enabled),
        );

        SlideshowConfig {
            slideshow_interval_secs,
            refresh_interval_mins,
            preload_enabled,
            random_only,
            hide_button_visible,
            weather_enabled,
        }
    }

    /// Resolve an interval-like key
    pub async fn resolve_interval(&self, key: ConfigKey, default: u64) -> u64 {
        self.resolve(key, default).await
    }

    /// Resolve a boolean key
    pub async fn resolve_flag(&self, key: ConfigKey, default: bool) -> bool {
        self.resolve(key, default).await
    }

    async fn resolve<T: ConfigValue>(&self, key: ConfigKey, default: T) -> T {
        if let Some(raw) = self.overrides.get(key) {
            if let Some(value) = T::parse_value(raw) {
                debug!(?key, ?value, "Config resolved from query override");
                return value;
            }
            warn!(?key, raw, "Ignoring unparseable query override");
        }

        match self.backend.config_value(key).await {
            Ok(raw) => match T::parse_value(&raw) {
                Some(value) => {
                    debug!(?key, ?value, "Config resolved from backend");
                    value
                }
                None => {
                    warn!(?key, raw = %raw, ?default, "Unparseable backend config, using default");
                    default
                }
            },
            Err(e) => {
                debug!(?key, ?default, error = %e, "Backend config unavailable, using default");
                default
            }
        }
    }
}
