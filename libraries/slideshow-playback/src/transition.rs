//! Fade transition for a single render
//!
//! Fixed four-phase sequence per resource:
//! 1. `FadingOut`: add the fade-out class, wait [`FADE_OUT_PAUSE`]
//! 2. `Loading`: request image and caption independently
//! 3. `FadingIn`: once the image is shown, swap fade-out for fade-in
//! 4. `Idle`: after [`FADE_IN_PAUSE`], drop the fade-in class
//!
//! Renders are not serialized against each other. A tick may start a new
//! render while an older one is still loading; whichever response lands last
//! wins, unless stale suppression is switched on.

use crate::backend::SlideshowBackend;
use crate::engine::SharedState;
use crate::events::{EventBus, PlaybackEvent};
use crate::scope::TaskScope;
use crate::surface::{FadeClass, Surface};
use crate::types::{ResourceId, TransitionPhase};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Pause between starting the fade-out and requesting the new image
pub const FADE_OUT_PAUSE: Duration = Duration::from_millis(1000);

/// Pause between starting the fade-in and returning to steady state
pub const FADE_IN_PAUSE: Duration = Duration::from_millis(1000);

/// Tracks and announces the phase of one render
struct RenderCycle<'a> {
    generation: u64,
    resource_id: ResourceId,
    phase: TransitionPhase,
    events: &'a EventBus,
}

impl<'a> RenderCycle<'a> {
    fn new(generation: u64, resource_id: ResourceId, events: &'a EventBus) -> Self {
        Self {
            generation,
            resource_id,
            phase: TransitionPhase::Idle,
            events,
        }
    }

    fn advance(&mut self) {
        self.phase = self.phase.next();
        debug!(
            generation = self.generation,
            resource_id = %self.resource_id,
            phase = ?self.phase,
            "Render phase"
        );
        self.events.emit(PlaybackEvent::PhaseChanged {
            generation: self.generation,
            resource_id: self.resource_id.clone(),
            phase: self.phase,
        });
    }
}

/// Renders resources onto the surface with the fade sequence
#[derive(Clone)]
pub struct FadeTransition {
    backend: Arc<dyn SlideshowBackend>,
    surface: Arc<dyn Surface>,
    state: SharedState,
    events: EventBus,
    scope: TaskScope,
    suppress_stale: bool,
}

impl FadeTransition {
    pub(crate) fn new(
        backend: Arc<dyn SlideshowBackend>,
        surface: Arc<dyn Surface>,
        state: SharedState,
        events: EventBus,
        scope: TaskScope,
        suppress_stale: bool,
    ) -> Self {
        Self {
            backend,
            surface,
            state,
            events,
            scope,
            suppress_stale,
        }
    }

    /// Run the full phase sequence for one resource
    pub async fn render(&self, resource_id: ResourceId, generation: u64) {
        let mut cycle = RenderCycle::new(generation, resource_id.clone(), &self.events);

        cycle.advance();
        self.surface.add_class(FadeClass::FadeOut);
        tokio::time::sleep(FADE_OUT_PAUSE).await;

        if self.is_stale(generation).await {
            self.skip_stale(&resource_id, generation);
            return;
        }

        cycle.advance();
        self.state.write().await.current_resource_id = Some(resource_id.clone());
        let size = self.surface.screen_size();

        self.spawn_caption_request(resource_id.clone(), generation);

        let image = match self.backend.image(&resource_id, size).await {
            Ok(image) => image,
            Err(e) => {
                self.fail(&resource_id, generation, e.to_string());
                return;
            }
        };

        if self.is_stale(generation).await {
            self.skip_stale(&resource_id, generation);
            return;
        }

        if let Err(e) = self.surface.present_image(&resource_id, image).await {
            self.fail(&resource_id, generation, e.to_string());
            return;
        }

        cycle.advance();
        self.surface.add_class(FadeClass::FadeIn);
        self.surface.remove_class(FadeClass::FadeOut);
        tokio::time::sleep(FADE_IN_PAUSE).await;

        self.surface.remove_class(FadeClass::FadeIn);
        cycle.advance();
    }

    /// Caption races the image; neither waits for the other
    fn spawn_caption_request(&self, resource_id: ResourceId, generation: u64) {
        let this = self.clone();
        self.scope.spawn(async move {
            match this.backend.description(&resource_id).await {
                Ok(caption) => {
                    if this.is_stale(generation).await {
                        return;
                    }
                    this.surface.set_caption(&caption);
                    this.events.emit(PlaybackEvent::CaptionUpdated {
                        resource_id,
                        caption,
                    });
                }
                Err(e) => {
                    warn!(resource_id = %resource_id, error = %e, "Caption request failed");
                }
            }
        });
    }

    async fn is_stale(&self, generation: u64) -> bool {
        self.suppress_stale && self.state.read().await.generation != generation
    }

    fn skip_stale(&self, resource_id: &ResourceId, generation: u64) {
        debug!(resource_id = %resource_id, generation, "Skipping superseded render");
        self.events.emit(PlaybackEvent::StaleRenderSkipped {
            generation,
            resource_id: resource_id.clone(),
        });
    }

    fn fail(&self, resource_id: &ResourceId, generation: u64, message: String) {
        warn!(resource_id = %resource_id, generation, error = %message, "Render failed");
        self.events.emit(PlaybackEvent::RenderFailed {
            generation,
            resource_id: resource_id.clone(),
            message,
        });
    }
}
