//! Weather overlay
//!
//! Runs independently of playback. When enabled it shows the current weather
//! description and icon from the primary weather source, plus a temperature
//! that comes from the ambient sensor integration when that is enabled and
//! from the primary source otherwise.

use crate::backend::SlideshowBackend;
use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, PlaybackEvent};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Icon URL template of the primary weather source
const ICON_URL_BASE: &str = "https://openweathermap.org/img/w";

/// Current weather as reported by the primary source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

/// Reading of the ambient temperature sensor (Home Assistant entity state)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientTemperature {
    /// Sensor state; usually a numeric string such as `"21.6"`
    pub state: serde_json::Value,
    pub attributes: AmbientAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbientAttributes {
    #[serde(default)]
    pub unit_of_measurement: String,
}

impl AmbientTemperature {
    /// Numeric reading, if the sensor reported one
    pub fn reading(&self) -> Option<f64> {
        let reading = match &self.state {
            serde_json::Value::Number(number) => number.as_f64(),
            serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        reading.filter(|value| value.is_finite())
    }
}

/// Unit system the primary weather source reports in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherUnit {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl WeatherUnit {
    /// Parse the backend's unit setting; unknown values fall back to metric
    pub fn from_setting(setting: &str) -> Self {
        match setting.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "imperial" => WeatherUnit::Imperial,
            "standard" => WeatherUnit::Standard,
            _ => WeatherUnit::Metric,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            WeatherUnit::Metric => "°C",
            WeatherUnit::Imperial => "°F",
            WeatherUnit::Standard => "K",
        }
    }
}

/// Format a temperature rounded half-up, as shown on screen (`22°C`)
pub fn format_temperature(value: f64, unit: &str) -> String {
    let rounded = (value + 0.5).floor() as i64;
    format!("{}{}", rounded, unit)
}

/// Icon URL for a weather condition
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_URL_BASE, icon)
}

pub struct WeatherOverlay {
    backend: Arc<dyn SlideshowBackend>,
    surface: Arc<dyn Surface>,
    events: EventBus,
}

impl WeatherOverlay {
    pub fn new(
        backend: Arc<dyn SlideshowBackend>,
        surface: Arc<dyn Surface>,
        events: EventBus,
    ) -> Self {
        Self {
            backend,
            surface,
            events,
        }
    }

    /// Show the overlay if `enabled`; failures are logged, never raised
    pub async fn run(&self, enabled: bool) {
        if !enabled {
            debug!("Weather overlay disabled");
            return;
        }

        if let Err(e) = self.show().await {
            warn!(error = %e, "Failed to load current weather");
        }
    }

    async fn show(&self) -> Result<()> {
        let current = self.backend.current_weather().await?;
        let condition = current
            .weather
            .first()
            .ok_or_else(|| PlaybackError::InvalidResponse("weather list is empty".into()))?;

        self.surface
            .set_weather_condition(&condition.description, &icon_url(&condition.icon));

        let temperature = self.temperature_text(&current).await;
        self.surface.set_temperature(&temperature);

        info!(
            description = %condition.description,
            temperature = %temperature,
            "Weather shown"
        );
        self.events.emit(PlaybackEvent::WeatherShown {
            description: condition.description.clone(),
            temperature,
        });
        Ok(())
    }

    /// Ambient sensor temperature when enabled and readable, else the primary
    /// source's temperature in the configured unit
    pub async fn temperature_text(&self, current: &CurrentWeather) -> String {
        if let Some(text) = self.ambient_temperature_text().await {
            return text;
        }

        let unit = match self.backend.weather_unit().await {
            Ok(setting) => WeatherUnit::from_setting(&setting),
            Err(e) => {
                debug!(error = %e, "Weather unit unavailable, assuming metric");
                WeatherUnit::Metric
            }
        };
        format_temperature(current.main.temp, unit.symbol())
    }

    async fn ambient_temperature_text(&self) -> Option<String> {
        match self.backend.ambient_enabled().await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                debug!(error = %e, "Ambient sensor flag unavailable");
                return None;
            }
        }

        match self.backend.ambient_temperature().await {
            Ok(ambient) => match ambient.reading() {
                Some(value) => Some(format_temperature(
                    value,
                    &ambient.attributes.unit_of_measurement,
                )),
                None => {
                    warn!(state = %ambient.state, "Ambient sensor state is not numeric");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Ambient temperature request failed");
                None
            }
        }
    }
}
