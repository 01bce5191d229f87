//! Slideshow - Playback Orchestration
//!
//! Platform-agnostic playback engine for the slideshow player.
//!
//! This crate provides:
//! - Config resolution (query-string overrides, backend values, defaults)
//! - Playlist selection (this week's resources, random, empty fallback)
//! - Tick scheduling with a cancellable recurring timer
//! - Four-phase fade transition per rendered resource
//! - Opportunistic preloading of the next resource
//! - The "hide this image" workflow
//! - An independent weather overlay
//!
//! # Architecture
//!
//! `slideshow-playback` knows nothing about HTTP or the display:
//! - The backend REST surface is the [`SlideshowBackend`] trait
//! - The page elements are the [`Surface`] trait
//! - A page lifetime is a [`Session`]; a page reload is the end of
//!   [`Session::run`] followed by a fresh call
//!
//! # Example: Running a session
//!
//! ```rust,no_run
//! use slideshow_playback::{QueryOverrides, Session, SessionOptions, SlideshowBackend, Surface};
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! async fn play(backend: Arc<dyn SlideshowBackend>, surface: Arc<dyn Surface>) {
//!     let options = SessionOptions {
//!         overrides: QueryOverrides::parse("SLIDESHOW_INTERVAL=5"),
//!         ..SessionOptions::default()
//!     };
//!     let session = Session::new(backend, surface, options);
//!     let (_actions_tx, mut actions) = mpsc::channel(8);
//!
//!     loop {
//!         let reason = session.run(&mut actions).await;
//!         tracing::info!(?reason, "Reloading");
//!     }
//! }
//! ```

mod backend;
mod config;
mod engine;
mod error;
mod events;
mod hide;
mod preload;
mod scope;
mod session;
mod source;
mod surface;
mod transition;
pub mod types;
pub mod weather;

// Public exports
pub use backend::SlideshowBackend;
pub use config::{ConfigKey, ConfigResolver, QueryOverrides, SlideshowConfig};
pub use engine::{EngineHandle, EngineState, PlaybackEngine, TickOutcome};
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlaybackEvent};
pub use hide::HideWorkflow;
pub use preload::Preloader;
pub use scope::TaskScope;
pub use session::{ReloadReason, Session, SessionOptions, UserAction};
pub use source::ResourceSource;
pub use surface::{FadeClass, ScreenSize, Surface};
pub use transition::{FadeTransition, FADE_IN_PAUSE, FADE_OUT_PAUSE};
pub use types::{EngineStatus, PlaybackCursor, Playlist, PlaylistOrigin, ResourceId, TransitionPhase};
pub use weather::WeatherOverlay;
