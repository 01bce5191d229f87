//! Shared test doubles for playback integration tests
//!
//! `FakeBackend` answers from in-memory fixtures and records every call.
//! `RecordingSurface` records every surface update with its virtual time.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use slideshow_playback::weather::{
    AmbientAttributes, AmbientTemperature, CurrentWeather, MainReadings, WeatherCondition,
};
use slideshow_playback::{
    ConfigKey, FadeClass, PlaybackError, PlaybackEvent, Playlist, PlaylistOrigin, ResourceId,
    Result, ScreenSize, SlideshowBackend, Surface,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

// ============================================================================
// BACKEND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    WeekCount,
    WeekPlaylist,
    RandomPlaylist,
    RandomResource,
    Image(ResourceId),
    WarmImage(ResourceId),
    Description(ResourceId),
    Hide(ResourceId),
    Config(ConfigKey),
    CurrentWeather,
    AmbientEnabled,
    AmbientTemperature,
    WeatherUnit,
}

pub struct FakeBackend {
    pub week: Vec<ResourceId>,
    pub week_unavailable: bool,
    pub random_playlist: Vec<ResourceId>,
    /// Scripted single draws; once exhausted `default_random` is returned
    pub random_draws: Mutex<VecDeque<Option<ResourceId>>>,
    pub default_random: Option<ResourceId>,
    pub config: HashMap<ConfigKey, String>,
    pub image_delays: HashMap<ResourceId, Duration>,
    pub failing_images: HashSet<ResourceId>,
    pub hide_fails: bool,
    pub weather: Option<CurrentWeather>,
    pub ambient_enabled: bool,
    pub ambient: Option<AmbientTemperature>,
    pub unit: Option<String>,
    pub screen_sizes: Mutex<Vec<ScreenSize>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            week: Vec::new(),
            week_unavailable: false,
            random_playlist: Vec::new(),
            random_draws: Mutex::new(VecDeque::new()),
            default_random: None,
            config: HashMap::new(),
            image_delays: HashMap::new(),
            failing_images: HashSet::new(),
            hide_fails: false,
            weather: None,
            ambient_enabled: false,
            ambient: None,
            unit: None,
            screen_sizes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn with_week(ids: &[&str]) -> Self {
        Self {
            week: ids.iter().map(|id| ResourceId::new(*id)).collect(),
            ..Self::default()
        }
    }

    pub fn config(mut self, key: ConfigKey, value: &str) -> Self {
        self.config.insert(key, value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn count_matching(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> PlaybackError {
        PlaybackError::Backend("503 Service Unavailable".to_string())
    }
}

#[async_trait]
impl SlideshowBackend for FakeBackend {
    async fn week_playlist(&self) -> Result<Playlist> {
        self.record(Call::WeekPlaylist);
        if self.week_unavailable {
            return Err(Self::unavailable());
        }
        Ok(Playlist::new(PlaylistOrigin::Week, self.week.clone()))
    }

    async fn week_count(&self) -> Result<usize> {
        self.record(Call::WeekCount);
        if self.week_unavailable {
            return Err(Self::unavailable());
        }
        Ok(self.week.len())
    }

    async fn random_playlist(&self) -> Result<Playlist> {
        self.record(Call::RandomPlaylist);
        Ok(Playlist::new(
            PlaylistOrigin::Random,
            self.random_playlist.clone(),
        ))
    }

    async fn random_resource(&self) -> Result<Option<ResourceId>> {
        self.record(Call::RandomResource);
        let scripted = self.random_draws.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| self.default_random.clone()))
    }

    async fn image(&self, id: &ResourceId, size: ScreenSize) -> Result<Bytes> {
        self.record(Call::Image(id.clone()));
        self.screen_sizes.lock().unwrap().push(size);
        if let Some(delay) = self.image_delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_images.contains(id) {
            return Err(PlaybackError::Backend("404 Not Found".to_string()));
        }
        Ok(Bytes::from(format!("image:{}", id)))
    }

    async fn warm_image(&self, id: &ResourceId, _size: ScreenSize) -> Result<()> {
        self.record(Call::WarmImage(id.clone()));
        Ok(())
    }

    async fn description(&self, id: &ResourceId) -> Result<String> {
        self.record(Call::Description(id.clone()));
        Ok(format!("caption of {}", id))
    }

    async fn hide(&self, id: &ResourceId) -> Result<()> {
        self.record(Call::Hide(id.clone()));
        if self.hide_fails {
            return Err(Self::unavailable());
        }
        Ok(())
    }

    async fn config_value(&self, key: ConfigKey) -> Result<String> {
        self.record(Call::Config(key));
        self.config.get(&key).cloned().ok_or_else(Self::unavailable)
    }

    async fn current_weather(&self) -> Result<CurrentWeather> {
        self.record(Call::CurrentWeather);
        self.weather.clone().ok_or_else(Self::unavailable)
    }

    async fn ambient_enabled(&self) -> Result<bool> {
        self.record(Call::AmbientEnabled);
        Ok(self.ambient_enabled)
    }

    async fn ambient_temperature(&self) -> Result<AmbientTemperature> {
        self.record(Call::AmbientTemperature);
        self.ambient.clone().ok_or_else(Self::unavailable)
    }

    async fn weather_unit(&self) -> Result<String> {
        self.record(Call::WeatherUnit);
        self.unit.clone().ok_or_else(Self::unavailable)
    }
}

pub fn sunny(temp: f64) -> CurrentWeather {
    CurrentWeather {
        weather: vec![WeatherCondition {
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }],
        main: MainReadings { temp },
    }
}

pub fn ambient(state: &str, unit: &str) -> AmbientTemperature {
    AmbientTemperature {
        state: serde_json::Value::String(state.to_string()),
        attributes: AmbientAttributes {
            unit_of_measurement: unit.to_string(),
        },
    }
}

// ============================================================================
// SURFACE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Reset,
    Add(FadeClass),
    Remove(FadeClass),
    Image(ResourceId),
    Caption(String),
    WeatherCondition { description: String, icon_url: String },
    Temperature(String),
    HideButton,
    Alert(String),
}

#[derive(Default)]
pub struct RecordingSurface {
    updates: Mutex<Vec<(Instant, Update)>>,
    pub screen: ScreenSize,
}

impl RecordingSurface {
    pub fn updates(&self) -> Vec<Update> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, update)| update.clone())
            .collect()
    }

    pub fn timed_updates(&self) -> Vec<(Instant, Update)> {
        self.updates.lock().unwrap().clone()
    }

    /// Time of the first occurrence of `update`
    pub fn time_of(&self, update: &Update) -> Option<Instant> {
        self.timed_updates()
            .into_iter()
            .find(|(_, u)| u == update)
            .map(|(at, _)| at)
    }

    pub fn images(&self) -> Vec<ResourceId> {
        self.updates()
            .into_iter()
            .filter_map(|u| match u {
                Update::Image(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|u| match u {
                Update::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, update: Update) {
        self.updates.lock().unwrap().push((Instant::now(), update));
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn reset(&self) {
        self.push(Update::Reset);
    }

    fn add_class(&self, class: FadeClass) {
        self.push(Update::Add(class));
    }

    fn remove_class(&self, class: FadeClass) {
        self.push(Update::Remove(class));
    }

    async fn present_image(&self, id: &ResourceId, _image: Bytes) -> Result<()> {
        self.push(Update::Image(id.clone()));
        Ok(())
    }

    fn set_caption(&self, caption: &str) {
        self.push(Update::Caption(caption.to_string()));
    }

    fn set_weather_condition(&self, description: &str, icon_url: &str) {
        self.push(Update::WeatherCondition {
            description: description.to_string(),
            icon_url: icon_url.to_string(),
        });
    }

    fn set_temperature(&self, temperature: &str) {
        self.push(Update::Temperature(temperature.to_string()));
    }

    fn show_hide_button(&self) {
        self.push(Update::HideButton);
    }

    fn alert(&self, message: &str) {
        self.push(Update::Alert(message.to_string()));
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Drain every event currently buffered in the receiver
pub fn drain(rx: &mut broadcast::Receiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Assert that `actual` is within a few milliseconds of `expected`
pub fn assert_close(actual: Duration, expected: Duration) {
    let tolerance = Duration::from_millis(5);
    assert!(
        actual >= expected && actual <= expected + tolerance,
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}

pub fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter().map(|id| ResourceId::new(*id)).collect()
}
