//! Playback Events
//!
//! Event-based observation of the playback state machine. Events are emitted
//! at key points:
//! - Engine status changes (idle, playing, random fallback, stopped)
//! - Every phase change of a render cycle
//! - Caption updates and preload requests
//! - Hide and reload requests

use crate::session::ReloadReason;
use crate::types::{EngineStatus, ResourceId, TransitionPhase};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default capacity of the event channel
const EVENT_CAPACITY: usize = 256;

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Engine state machine moved to a new status
    StatusChanged {
        /// The new engine status
        status: EngineStatus,
    },

    /// A render cycle entered a new phase
    PhaseChanged {
        /// Render generation (increments per tick that renders)
        generation: u64,
        /// Resource being rendered
        resource_id: ResourceId,
        /// The phase just entered
        phase: TransitionPhase,
    },

    /// Caption text arrived and was applied
    CaptionUpdated {
        resource_id: ResourceId,
        caption: String,
    },

    /// Image request or image display failed; no fade-in follows
    RenderFailed {
        generation: u64,
        resource_id: ResourceId,
        message: String,
    },

    /// A superseded render skipped its writes (stale suppression only)
    StaleRenderSkipped {
        generation: u64,
        resource_id: ResourceId,
    },

    /// Next resource's image was requested to warm the cache
    PreloadIssued { resource_id: ResourceId },

    /// Random fallback returned nothing; the alert was shown
    PlaybackStopped { message: String },

    /// Hide request sent for the displayed resource
    HideRequested { resource_id: ResourceId },

    /// Weather overlay rendered
    WeatherShown {
        description: String,
        temperature: String,
    },

    /// The session is about to end and the page reload
    ReloadRequested { reason: ReloadReason },
}

/// Broadcast channel for playback events
///
/// Sending never fails: with no subscriber the event is dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlaybackEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: PlaybackEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
