//! Slideshow Kiosk Library
//!
//! Headless slideshow player: wires the HTTP backend client to the playback
//! core and renders to the console (and optionally an image file).
//!
//! This library exposes the kiosk components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod surface;

// Re-export commonly used types for convenience
pub use commands::{forward_commands, parse_command};
pub use config::KioskConfig;
pub use error::{KioskError, Result};
pub use surface::{ConsoleSurface, SurfaceSnapshot};
