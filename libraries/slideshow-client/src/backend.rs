//! `SlideshowBackend` over HTTP.

use crate::client::SlideshowClient;
use async_trait::async_trait;
use bytes::Bytes;
use slideshow_playback::weather::{AmbientTemperature, CurrentWeather};
use slideshow_playback::{
    ConfigKey, Playlist, PlaylistOrigin, ResourceId, Result, ScreenSize, SlideshowBackend,
};

#[async_trait]
impl SlideshowBackend for SlideshowClient {
    async fn week_playlist(&self) -> Result<Playlist> {
        let ids = self.resources().week().await?;
        Ok(Playlist::new(PlaylistOrigin::Week, ids))
    }

    async fn week_count(&self) -> Result<usize> {
        Ok(self.resources().week_count().await?)
    }

    async fn random_playlist(&self) -> Result<Playlist> {
        let ids = self.resources().random_list().await?;
        Ok(Playlist::new(PlaylistOrigin::Random, ids))
    }

    async fn random_resource(&self) -> Result<Option<ResourceId>> {
        Ok(self.resources().random_single().await?)
    }

    async fn image(&self, id: &ResourceId, size: ScreenSize) -> Result<Bytes> {
        Ok(self.resources().image(id, size.width, size.height).await?)
    }

    async fn warm_image(&self, id: &ResourceId, size: ScreenSize) -> Result<()> {
        Ok(self
            .resources()
            .warm_image(id, size.width, size.height)
            .await?)
    }

    async fn description(&self, id: &ResourceId) -> Result<String> {
        Ok(self.resources().description(id).await?)
    }

    async fn hide(&self, id: &ResourceId) -> Result<()> {
        Ok(self.resources().hide(id).await?)
    }

    async fn config_value(&self, key: ConfigKey) -> Result<String> {
        Ok(self.settings().value(key).await?)
    }

    async fn current_weather(&self) -> Result<CurrentWeather> {
        Ok(self.weather().current().await?)
    }

    async fn ambient_enabled(&self) -> Result<bool> {
        Ok(self.weather().ambient_enabled().await?)
    }

    async fn ambient_temperature(&self) -> Result<AmbientTemperature> {
        Ok(self.weather().ambient_temperature().await?)
    }

    async fn weather_unit(&self) -> Result<String> {
        Ok(self.weather().unit().await?)
    }
}
