//! Playback engine - tick scheduling and state machine
//!
//! ```text
//! Idle ──start(non-empty)──▶ Playing          (render playlist[i], i = (i+1) mod len)
//!   └───start(empty)───────▶ RandomFallback   (draw one random resource per tick)
//!                                 └──draw returned nothing──▶ Stopped (alert once, timer cancelled)
//! ```
//!
//! The scheduler fires the first tick as soon as the playlist arrives and then
//! once per slideshow interval. A tick only *starts* a render; it never waits
//! for the previous render's fade sequence to finish.

use crate::backend::SlideshowBackend;
use crate::config::SlideshowConfig;
use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, PlaybackEvent};
use crate::preload::Preloader;
use crate::scope::TaskScope;
use crate::source::ResourceSource;
use crate::surface::Surface;
use crate::transition::FadeTransition;
use crate::types::{EngineStatus, PlaybackCursor, Playlist, ResourceId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Alert shown when not even a random resource is available
pub const NO_RESOURCES_MESSAGE: &str = "Could not find any photos!";

/// Shortest tick interval the scheduler accepts
const MIN_TICK_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) type SharedState = Arc<RwLock<EngineState>>;

/// Mutable engine state, shared between the scheduler, renders and the hide
/// workflow
#[derive(Debug, Clone)]
pub struct EngineState {
    status: EngineStatus,

    /// Set once per session, never modified afterwards
    playlist: Option<Playlist>,

    /// `None` while idle or when the playlist is empty
    cursor: Option<PlaybackCursor>,

    /// Resource whose image was last requested by a render
    pub(crate) current_resource_id: Option<ResourceId>,

    /// Generation of the most recently issued render
    pub(crate) generation: u64,
}

impl EngineState {
    fn new() -> Self {
        Self {
            status: EngineStatus::Idle,
            playlist: None,
            cursor: None,
            current_resource_id: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    pub fn cursor(&self) -> Option<PlaybackCursor> {
        self.cursor
    }

    pub fn current_resource_id(&self) -> Option<&ResourceId> {
        self.current_resource_id.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No playlist yet
    NotStarted,

    /// A render was issued for this resource
    Rendered(ResourceId),

    /// Nothing left to show; the scheduler must stop
    Stopped,
}

/// Handle to a running scheduler
pub struct EngineHandle {
    scheduler: TaskScope,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Stop issuing ticks; renders already in flight continue
    pub fn cancel(&self) {
        self.scheduler.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.scheduler.is_cancelled()
    }

    /// Wait until the scheduler loop has exited
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            debug!(error = %e, "Scheduler task ended abnormally");
        }
    }
}

/// Drives ticks and renders for one session
pub struct PlaybackEngine {
    state: SharedState,
    source: ResourceSource,
    transition: FadeTransition,
    preloader: Preloader,
    surface: Arc<dyn Surface>,
    events: EventBus,
    scope: TaskScope,
    interval: Duration,
}

impl PlaybackEngine {
    /// Create an idle engine
    ///
    /// All renders, caption requests and preloads are spawned into `scope`;
    /// cancelling it tears the engine down.
    pub fn new(
        backend: Arc<dyn SlideshowBackend>,
        surface: Arc<dyn Surface>,
        config: &SlideshowConfig,
        events: EventBus,
        scope: TaskScope,
        suppress_stale_renders: bool,
    ) -> Self {
        let state: SharedState = Arc::new(RwLock::new(EngineState::new()));

        let transition = FadeTransition::new(
            Arc::clone(&backend),
            Arc::clone(&surface),
            Arc::clone(&state),
            events.clone(),
            scope.clone(),
            suppress_stale_renders,
        );
        let preloader = Preloader::new(
            Arc::clone(&backend),
            events.clone(),
            scope.clone(),
            config.preload_enabled,
        );

        Self {
            state,
            source: ResourceSource::new(backend),
            transition,
            preloader,
            surface,
            events,
            scope,
            interval: config.slideshow_interval().max(MIN_TICK_INTERVAL),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> EngineState {
        self.state.read().await.clone()
    }

    pub(crate) fn shared_state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Install the session's playlist without scheduling any tick
    pub async fn load(&self, playlist: Playlist) -> Result<()> {
        let mut state = self.state.write().await;
        if state.playlist.is_some() {
            return Err(PlaybackError::AlreadyStarted);
        }

        state.cursor = PlaybackCursor::new(playlist.len());
        state.status = if playlist.is_empty() {
            EngineStatus::RandomFallback
        } else {
            EngineStatus::Playing
        };

        info!(
            origin = ?playlist.origin(),
            len = playlist.len(),
            status = ?state.status,
            "Playlist loaded"
        );

        self.events.emit(PlaybackEvent::StatusChanged {
            status: state.status,
        });
        state.playlist = Some(playlist);
        Ok(())
    }

    /// Install the session's playlist and start the scheduler
    ///
    /// The first tick fires immediately.
    pub async fn start(self: &Arc<Self>, playlist: Playlist) -> Result<EngineHandle> {
        self.load(playlist).await?;
        info!(interval_secs = self.interval.as_secs(), "Starting slideshow");

        let scheduler = self.scope.child();
        let engine = Arc::clone(self);
        let loop_scope = scheduler.clone();
        let task = self
            .scope
            .spawn(async move { engine.run_scheduler(loop_scope).await });

        Ok(EngineHandle { scheduler, task })
    }

    async fn run_scheduler(&self, scheduler: TaskScope) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                () = scheduler.cancelled() => {
                    debug!("Scheduler cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if self.tick().await == TickOutcome::Stopped {
                        scheduler.cancel();
                        break;
                    }
                }
            }
        }
    }

    /// Execute one tick of the state machine
    pub async fn tick(&self) -> TickOutcome {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        match state.status {
            EngineStatus::Idle => return TickOutcome::NotStarted,
            EngineStatus::Stopped => return TickOutcome::Stopped,
            EngineStatus::Playing | EngineStatus::RandomFallback => {}
        }

        let scheduled = match (state.playlist.as_ref(), state.cursor.as_mut()) {
            (Some(playlist), Some(cursor)) => {
                let current = playlist.as_slice()[cursor.index()].clone();
                cursor.advance();
                let next = playlist.as_slice()[cursor.index()].clone();
                state.generation += 1;
                Some((current, next, state.generation))
            }
            _ => None,
        };
        drop(guard);

        if let Some((current, next, generation)) = scheduled {
            self.issue_render(current.clone(), generation);
            self.preloader.preload(next, self.surface.screen_size());
            return TickOutcome::Rendered(current);
        }

        match self.source.fetch_single_random_resource().await {
            Some(resource_id) => {
                let generation = {
                    let mut state = self.state.write().await;
                    state.generation += 1;
                    state.generation
                };
                self.issue_render(resource_id.clone(), generation);
                TickOutcome::Rendered(resource_id)
            }
            None => self.stop().await,
        }
    }

    fn issue_render(&self, resource_id: ResourceId, generation: u64) {
        debug!(resource_id = %resource_id, generation, "Tick issued render");
        let transition = self.transition.clone();
        self.scope
            .spawn(async move { transition.render(resource_id, generation).await });
    }

    /// Enter `Stopped`; the alert fires only on the first call
    async fn stop(&self) -> TickOutcome {
        {
            let mut state = self.state.write().await;
            if state.status == EngineStatus::Stopped {
                return TickOutcome::Stopped;
            }
            state.status = EngineStatus::Stopped;
        }

        error!("No resources available at all, stopping slideshow");
        self.surface.alert(NO_RESOURCES_MESSAGE);
        self.events.emit(PlaybackEvent::StatusChanged {
            status: EngineStatus::Stopped,
        });
        self.events.emit(PlaybackEvent::PlaybackStopped {
            message: NO_RESOURCES_MESSAGE.to_string(),
        });
        TickOutcome::Stopped
    }
}
