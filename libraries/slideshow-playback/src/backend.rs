//! Backend REST surface consumed by the player
//!
//! One method per endpoint. Implemented over HTTP by `slideshow-client`,
//! and by fakes in tests.

use crate::config::ConfigKey;
use crate::error::Result;
use crate::surface::ScreenSize;
use crate::types::{Playlist, ResourceId};
use crate::weather::{AmbientTemperature, CurrentWeather};
use async_trait::async_trait;
use bytes::Bytes;

/// Backend consumed by the playback engine
///
/// Every method reports network failures and non-success statuses as errors;
/// the caller decides the fallback.
#[async_trait]
pub trait SlideshowBackend: Send + Sync {
    /// `GET /api/resources/week`
    async fn week_playlist(&self) -> Result<Playlist>;

    /// `GET /api/resources/week/count`
    async fn week_count(&self) -> Result<usize>;

    /// `GET /api/resources/random`, read as a playlist
    async fn random_playlist(&self) -> Result<Playlist>;

    /// `GET /api/resources/random`, read as a single resource
    ///
    /// `Ok(None)` when the backend has nothing to offer.
    async fn random_resource(&self) -> Result<Option<ResourceId>>;

    /// `GET /api/resources/{id}/{w}/{h}`
    async fn image(&self, id: &ResourceId, size: ScreenSize) -> Result<Bytes>;

    /// Request an image only to warm the backend cache
    async fn warm_image(&self, id: &ResourceId, size: ScreenSize) -> Result<()> {
        self.image(id, size).await.map(|_| ())
    }

    /// `GET /api/resources/{id}/description`
    async fn description(&self, id: &ResourceId) -> Result<String>;

    /// `POST /api/resources/hide/{id}`
    async fn hide(&self, id: &ResourceId) -> Result<()>;

    /// Raw text of a config scalar (`/api/config/...`, `/api/weather`)
    async fn config_value(&self, key: ConfigKey) -> Result<String>;

    /// `GET /api/weather/current`
    async fn current_weather(&self) -> Result<CurrentWeather>;

    /// `GET /api/weather/homeassistant`
    async fn ambient_enabled(&self) -> Result<bool>;

    /// `GET /api/weather/homeassistant/temperature`
    async fn ambient_temperature(&self) -> Result<AmbientTemperature>;

    /// `GET /api/weather/unit`
    async fn weather_unit(&self) -> Result<String>;
}
