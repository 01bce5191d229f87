//! Display surface trait
//!
//! Abstracts the page elements (slideshow image, blurred background, caption,
//! weather widgets, hide button) so the engine can drive any display.

use crate::error::Result;
use crate::types::ResourceId;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Available screen area, used to size image requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Visual treatment classes applied to the image, background and caption
///
/// Classes are added and removed independently, so an overlapping render can
/// add `FadeOut` while an older one is still removing `FadeIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FadeClass {
    FadeOut,
    FadeIn,
}

/// Platform-agnostic display surface
///
/// Implementors own the actual output (DOM, window, framebuffer, log).
#[async_trait]
pub trait Surface: Send + Sync {
    /// Screen area to request images for
    fn screen_size(&self) -> ScreenSize;

    /// Clear everything, as a freshly loaded page would be
    fn reset(&self) {}

    /// Add a treatment class to the image, background and caption elements
    fn add_class(&self, class: FadeClass);

    /// Remove a treatment class from the image, background and caption elements
    fn remove_class(&self, class: FadeClass);

    /// Show the fetched image (foreground and blurred background)
    ///
    /// Returning `Ok` is the "image finished loading" signal that starts the
    /// fade-in. An error leaves the element in a broken state and no fade-in
    /// happens.
    async fn present_image(&self, id: &ResourceId, image: Bytes) -> Result<()>;

    /// Replace the caption text
    fn set_caption(&self, caption: &str);

    /// Show the weather description and its icon
    fn set_weather_condition(&self, description: &str, icon_url: &str);

    /// Show the formatted temperature (e.g. `22°C`)
    fn set_temperature(&self, temperature: &str);

    /// Make the hide button visible
    fn show_hide_button(&self);

    /// User-facing alert
    fn alert(&self, message: &str);
}
