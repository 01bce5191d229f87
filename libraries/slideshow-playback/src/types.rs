//! Core types for slideshow playback

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier of a displayable resource
///
/// The backend may send ids as JSON strings or numbers; both are kept as text.
/// No uniqueness is assumed: a playlist may contain the same id twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new resource id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as text (used to build request paths)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(number) => Self(number.to_string()),
        })
    }
}

/// Where a playlist came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistOrigin {
    /// Ordered resources of the current week
    Week,

    /// Random selection (random-only mode or empty week)
    Random,
}

/// Ordered sequence of resources, immutable for the lifetime of a session
///
/// An empty playlist is meaningful: it puts the engine into random fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    origin: PlaylistOrigin,
    items: Vec<ResourceId>,
}

impl Playlist {
    pub fn new(origin: PlaylistOrigin, items: Vec<ResourceId>) -> Self {
        Self { origin, items }
    }

    pub fn empty(origin: PlaylistOrigin) -> Self {
        Self::new(origin, Vec::new())
    }

    pub fn origin(&self) -> PlaylistOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResourceId> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[ResourceId] {
        &self.items
    }
}

/// Position in a non-empty playlist
///
/// Invariant: `index < length` and `length > 0`. A cursor cannot exist for an
/// empty playlist, so "undefined cursor" is `Option::None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    index: usize,
    length: usize,
}

impl PlaybackCursor {
    /// Create a cursor at index 0, or `None` for an empty playlist
    pub fn new(length: usize) -> Option<Self> {
        (length > 0).then_some(Self { index: 0, length })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Move to the next position, wrapping around at the end
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.length;
    }
}

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// No playlist yet
    Idle,

    /// Cycling through a non-empty playlist
    Playing,

    /// Playlist is empty, every tick draws one random resource
    RandomFallback,

    /// Random fallback came back empty; scheduler cancelled for good
    Stopped,
}

/// Phase of a single render cycle
///
/// Order is fixed: `Idle → FadingOut → Loading → FadingIn → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Loading,
    FadingIn,
}

impl TransitionPhase {
    /// The only phase allowed to follow this one
    pub fn next(self) -> Self {
        match self {
            TransitionPhase::Idle => TransitionPhase::FadingOut,
            TransitionPhase::FadingOut => TransitionPhase::Loading,
            TransitionPhase::Loading => TransitionPhase::FadingIn,
            TransitionPhase::FadingIn => TransitionPhase::Idle,
        }
    }
}
