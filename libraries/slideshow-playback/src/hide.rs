//! "Hide this image" workflow
//!
//! Marks the displayed resource as hidden on the backend, then asks for a
//! reload so the next session gets a playlist without it. Whether the backend
//! accepted the request does not matter: the reload always follows.

use crate::backend::SlideshowBackend;
use crate::engine::SharedState;
use crate::events::{EventBus, PlaybackEvent};
use crate::session::ReloadReason;
use std::sync::Arc;
use tracing::{info, warn};

pub struct HideWorkflow {
    backend: Arc<dyn SlideshowBackend>,
    state: SharedState,
    events: EventBus,
}

impl HideWorkflow {
    pub(crate) fn new(
        backend: Arc<dyn SlideshowBackend>,
        state: SharedState,
        events: EventBus,
    ) -> Self {
        Self {
            backend,
            state,
            events,
        }
    }

    /// Hide the current resource
    ///
    /// Returns `None` when nothing has been rendered yet; there is nothing to
    /// hide and no reload is needed.
    pub async fn hide_current(&self) -> Option<ReloadReason> {
        let Some(resource_id) = self.state.read().await.current_resource_id.clone() else {
            warn!("Hide requested before any resource was displayed");
            return None;
        };

        self.events.emit(PlaybackEvent::HideRequested {
            resource_id: resource_id.clone(),
        });

        match self.backend.hide(&resource_id).await {
            Ok(()) => info!(resource_id = %resource_id, "Resource hidden"),
            Err(e) => warn!(resource_id = %resource_id, error = %e, "Hide request failed"),
        }

        Some(ReloadReason::ResourceHidden { resource_id })
    }
}
