//! Weather endpoints.

use crate::client::{endpoint, parse_flag, send, text};
use crate::error::{ClientError, Result};
use reqwest::Client;
use slideshow_playback::weather::{AmbientTemperature, CurrentWeather};
use tracing::debug;

/// Client for `/api/weather/...`.
pub struct WeatherClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> WeatherClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Current conditions from the primary weather source.
    pub async fn current(&self) -> Result<CurrentWeather> {
        let url = endpoint(self.base_url, &["api", "weather", "current"])?;
        debug!(url = %url, "Fetching current weather");

        send(self.http.get(url)).await?.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse current weather: {}", e))
        })
    }

    /// Whether the ambient sensor integration is switched on.
    pub async fn ambient_enabled(&self) -> Result<bool> {
        let url = endpoint(self.base_url, &["api", "weather", "homeassistant"])?;
        debug!(url = %url, "Fetching ambient sensor flag");

        parse_flag(&text(send(self.http.get(url)).await?).await?)
    }

    /// Latest ambient sensor state.
    pub async fn ambient_temperature(&self) -> Result<AmbientTemperature> {
        let url = endpoint(
            self.base_url,
            &["api", "weather", "homeassistant", "temperature"],
        )?;
        debug!(url = %url, "Fetching ambient temperature");

        send(self.http.get(url)).await?.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse ambient temperature: {}", e))
        })
    }

    /// Unit setting of the primary source (`metric`, `imperial`, `standard`).
    pub async fn unit(&self) -> Result<String> {
        let url = endpoint(self.base_url, &["api", "weather", "unit"])?;
        debug!(url = %url, "Fetching weather unit");

        text(send(self.http.get(url)).await?).await
    }
}
