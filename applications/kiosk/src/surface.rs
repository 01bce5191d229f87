//! Console surface
//!
//! Headless stand-in for the page: logs every visual change and optionally
//! writes the current image to a file for an external viewer.

use async_trait::async_trait;
use bytes::Bytes;
use slideshow_playback::{FadeClass, PlaybackError, ResourceId, Result, ScreenSize, Surface};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// What the page currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub classes: BTreeSet<FadeClass>,
    pub image: Option<ResourceId>,
    pub caption: Option<String>,
    pub weather: Option<(String, String)>,
    pub temperature: Option<String>,
    pub hide_button_visible: bool,
    pub alerts: Vec<String>,
}

pub struct ConsoleSurface {
    screen: ScreenSize,
    image_output: Option<PathBuf>,
    state: Mutex<SurfaceSnapshot>,
}

impl ConsoleSurface {
    pub fn new(screen: ScreenSize, image_output: Option<PathBuf>) -> Self {
        Self {
            screen,
            image_output,
            state: Mutex::new(SurfaceSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, SurfaceSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write through a temporary file so a viewer never reads half an image
    async fn write_image(&self, image: &Bytes) -> Result<()> {
        let Some(path) = &self.image_output else {
            return Ok(());
        };

        let mut staging = path.clone().into_os_string();
        staging.push(".part");
        let staging = PathBuf::from(staging);

        let written = match tokio::fs::write(&staging, image).await {
            Ok(()) => tokio::fs::rename(&staging, path).await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            PlaybackError::Surface(format!("cannot write {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), size = image.len(), "Image written");
        Ok(())
    }
}

#[async_trait]
impl Surface for ConsoleSurface {
    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn reset(&self) {
        *self.state() = SurfaceSnapshot::default();
        info!("Page loaded");
    }

    fn add_class(&self, class: FadeClass) {
        self.state().classes.insert(class);
        debug!(?class, "Class added");
    }

    fn remove_class(&self, class: FadeClass) {
        self.state().classes.remove(&class);
        debug!(?class, "Class removed");
    }

    async fn present_image(&self, id: &ResourceId, image: Bytes) -> Result<()> {
        self.write_image(&image).await?;
        self.state().image = Some(id.clone());
        info!(resource_id = %id, size = image.len(), "Showing image");
        Ok(())
    }

    fn set_caption(&self, caption: &str) {
        self.state().caption = Some(caption.to_string());
        info!(caption, "Caption");
    }

    fn set_weather_condition(&self, description: &str, icon_url: &str) {
        self.state().weather = Some((description.to_string(), icon_url.to_string()));
        info!(description, icon_url, "Weather");
    }

    fn set_temperature(&self, temperature: &str) {
        self.state().temperature = Some(temperature.to_string());
        info!(temperature, "Temperature");
    }

    fn show_hide_button(&self) {
        self.state().hide_button_visible = true;
        info!("Hide button shown, type \"hide\" to hide the current image");
    }

    fn alert(&self, message: &str) {
        self.state().alerts.push(message.to_string());
        error!(message, "ALERT");
    }
}
