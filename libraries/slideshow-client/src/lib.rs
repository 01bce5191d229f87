//! Slideshow Backend Client
//!
//! HTTP client library for the slideshow backend REST API.
//!
//! # Features
//!
//! - **Resources**: weekly and random playlists, sized images, captions, hiding
//! - **Settings**: slideshow config scalars
//! - **Weather**: current weather, ambient sensor temperature, unit setting
//!
//! [`SlideshowClient`] implements [`slideshow_playback::SlideshowBackend`], so
//! it plugs straight into a playback session.
//!
//! # Example
//!
//! ```ignore
//! use slideshow_client::{ClientConfig, SlideshowClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SlideshowClient::new(ClientConfig::new("http://frame.local:8080"))?;
//!
//!     let week = client.resources().week().await?;
//!     println!("{} resources this week", week.len());
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod error;
mod resources;
mod settings;
mod types;
mod weather;

pub use client::SlideshowClient;
pub use error::{ClientError, Result};
pub use types::ClientConfig;

// Sub-clients, for direct use
pub use resources::{parse_random_body, ResourcesClient};
pub use settings::SettingsClient;
pub use weather::WeatherClient;
