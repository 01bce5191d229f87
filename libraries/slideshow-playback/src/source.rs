//! Resource selection
//!
//! Chooses which resources a session plays, and provides the per-tick random
//! draw used when the playlist turned out empty.

use crate::backend::SlideshowBackend;
use crate::error::Result;
use crate::types::{Playlist, ResourceId};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ResourceSource {
    backend: Arc<dyn SlideshowBackend>,
}

impl ResourceSource {
    pub fn new(backend: Arc<dyn SlideshowBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the playlist a session starts with
    ///
    /// Random-only mode always fetches a random playlist. Otherwise the cheap
    /// week count decides: zero means random, anything else the ordered
    /// weekly playlist. Errors leave the engine unstarted.
    pub async fn load_initial_playlist(&self, random_only: bool) -> Result<Playlist> {
        if random_only {
            debug!("Random-only mode, fetching random playlist");
            return self.backend.random_playlist().await;
        }

        let count = self.backend.week_count().await?;
        if count == 0 {
            info!("No resources for this week, falling back to random playlist");
            return self.backend.random_playlist().await;
        }

        let playlist = self.backend.week_playlist().await?;
        info!(count, fetched = playlist.len(), "Loaded this week's playlist");
        Ok(playlist)
    }

    /// Draw one random resource
    ///
    /// Any failure counts as "nothing available".
    pub async fn fetch_single_random_resource(&self) -> Option<ResourceId> {
        match self.backend.random_resource().await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                warn!("Backend has no random resource");
                None
            }
            Err(e) => {
                warn!(error = %e, "Random resource request failed");
                None
            }
        }
    }
}
