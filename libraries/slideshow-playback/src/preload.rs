//! Next-image preloading
//!
//! Fire-and-forget image request for the upcoming resource so the backend has
//! it resized and cached by the next tick. The response is discarded.

use crate::backend::SlideshowBackend;
use crate::events::{EventBus, PlaybackEvent};
use crate::scope::TaskScope;
use crate::surface::ScreenSize;
use crate::types::ResourceId;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Preloader {
    backend: Arc<dyn SlideshowBackend>,
    events: EventBus,
    scope: TaskScope,
    enabled: bool,
}

impl Preloader {
    pub(crate) fn new(
        backend: Arc<dyn SlideshowBackend>,
        events: EventBus,
        scope: TaskScope,
        enabled: bool,
    ) -> Self {
        Self {
            backend,
            events,
            scope,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Warm the cache for `resource_id` at the render size; no-op when disabled
    pub fn preload(&self, resource_id: ResourceId, size: ScreenSize) {
        if !self.enabled {
            return;
        }

        self.events.emit(PlaybackEvent::PreloadIssued {
            resource_id: resource_id.clone(),
        });

        let backend = Arc::clone(&self.backend);
        self.scope.spawn(async move {
            if let Err(e) = backend.warm_image(&resource_id, size).await {
                debug!(resource_id = %resource_id, error = %e, "Preload failed");
            }
        });
    }
}
