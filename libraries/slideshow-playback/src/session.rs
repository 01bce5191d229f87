//! Page session
//!
//! One [`Session::run`] call is one page lifetime:
//! 1. Resolve config
//! 2. Start the weather overlay and show the hide button if configured
//! 3. Load the initial playlist and start the engine
//! 4. Wait for the refresh timer or a hide action
//!
//! Returning from `run` cancels every task the session spawned. The caller
//! "reloads the page" by calling `run` again.

use crate::backend::SlideshowBackend;
use crate::config::{ConfigResolver, QueryOverrides};
use crate::engine::PlaybackEngine;
use crate::events::{EventBus, PlaybackEvent};
use crate::hide::HideWorkflow;
use crate::scope::TaskScope;
use crate::source::ResourceSource;
use crate::surface::Surface;
use crate::types::ResourceId;
use crate::weather::WeatherOverlay;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadReason {
    /// The periodic refresh interval elapsed
    RefreshTimer,

    /// The displayed resource was hidden
    ResourceHidden { resource_id: ResourceId },
}

/// User input delivered to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Hide button pressed
    HideCurrent,
}

/// Per-player options that do not come from the backend
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Query-string overrides for config values
    pub overrides: QueryOverrides,

    /// Skip writes from renders superseded by a newer tick (default: false)
    pub suppress_stale_renders: bool,
}

pub struct Session {
    backend: Arc<dyn SlideshowBackend>,
    surface: Arc<dyn Surface>,
    options: SessionOptions,
    events: EventBus,
}

impl Session {
    pub fn new(
        backend: Arc<dyn SlideshowBackend>,
        surface: Arc<dyn Surface>,
        options: SessionOptions,
    ) -> Self {
        Self {
            backend,
            surface,
            options,
            events: EventBus::new(),
        }
    }

    /// Events from all sessions run by this instance
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Run one page lifetime and report why it ended
    pub async fn run(&self, actions: &mut mpsc::Receiver<UserAction>) -> ReloadReason {
        let scope = TaskScope::new();
        let _teardown = scope.token().clone().drop_guard();

        self.surface.reset();

        let config = ConfigResolver::new(self.backend.as_ref(), &self.options.overrides)
            .resolve_all()
            .await;
        info!(?config, "Slideshow config resolved");

        let weather = WeatherOverlay::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.surface),
            self.events.clone(),
        );
        let weather_enabled = config.weather_enabled;
        scope.spawn(async move { weather.run(weather_enabled).await });

        if config.hide_button_visible {
            self.surface.show_hide_button();
        }

        let engine = Arc::new(PlaybackEngine::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.surface),
            &config,
            self.events.clone(),
            scope.clone(),
            self.options.suppress_stale_renders,
        ));
        let hide = HideWorkflow::new(
            Arc::clone(&self.backend),
            engine.shared_state(),
            self.events.clone(),
        );

        let source = ResourceSource::new(Arc::clone(&self.backend));
        let random_only = config.random_only;
        scope.spawn(async move {
            match source.load_initial_playlist(random_only).await {
                Ok(playlist) => {
                    if let Err(e) = engine.start(playlist).await {
                        error!(error = %e, "Failed to start slideshow");
                    }
                }
                Err(e) => error!(error = %e, "Error loading available images"),
            }
        });

        let refresh = tokio::time::sleep(config.refresh_interval());
        tokio::pin!(refresh);
        let mut actions_open = true;

        let reason = loop {
            tokio::select! {
                () = &mut refresh => break ReloadReason::RefreshTimer,
                action = actions.recv(), if actions_open => match action {
                    Some(UserAction::HideCurrent) if config.hide_button_visible => {
                        if let Some(reason) = hide.hide_current().await {
                            break reason;
                        }
                    }
                    Some(UserAction::HideCurrent) => {
                        debug!("Ignoring hide action, hide button is not shown");
                    }
                    None => actions_open = false,
                },
            }
        };

        info!(?reason, "Reloading");
        self.events.emit(PlaybackEvent::ReloadRequested {
            reason: reason.clone(),
        });
        reason
    }
}
