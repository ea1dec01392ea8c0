//! Recent-notes snapshot shared with the home-screen widget.
//!
//! The app writes a bounded snapshot into a key-value store that a separate
//! display surface reads on its own schedule, then asks that surface to
//! reload. Snapshots are replaced wholesale, never merged.

mod store;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::models::Note;

pub use store::{FileSharedStore, MemorySharedStore, SharedStore};

/// Key holding the serialized snapshot.
pub const WIDGET_CACHE_KEY: &str = "recent_notes_cache";
/// Display surface identifier passed to [`TimelineReloader`].
pub const WIDGET_KIND: &str = "NotesWidget";
/// Maximum number of notes in a snapshot.
pub const WIDGET_CAPACITY: usize = 5;

/// Most-recent-first notes, at most [`WIDGET_CAPACITY`] of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCacheSnapshot {
    recent_notes: Vec<Note>,
}

impl WidgetCacheSnapshot {
    /// Takes the first [`WIDGET_CAPACITY`] notes in order.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        Self {
            recent_notes: notes.into_iter().take(WIDGET_CAPACITY).cloned().collect(),
        }
    }

    pub fn recent_notes(&self) -> &[Note] {
        &self.recent_notes
    }

    pub fn is_empty(&self) -> bool {
        self.recent_notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recent_notes.len()
    }

    fn bounded(mut self) -> Self {
        self.recent_notes.truncate(WIDGET_CAPACITY);
        self
    }
}

/// Asks an external display surface to refresh at its next opportunity.
pub trait TimelineReloader: Send + Sync {
    fn reload_timelines(&self, kind: &str);
}

/// Reloader for front-ends without a live display surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReloader;

impl TimelineReloader for NoopReloader {
    fn reload_timelines(&self, kind: &str) {
        tracing::debug!(kind, "no display surface attached; reload skipped");
    }
}

/// Publishes a reload generation counter that display surfaces subscribe to.
#[derive(Debug)]
pub struct WatchReloader {
    sender: watch::Sender<u64>,
}

impl Default for WatchReloader {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchReloader {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(0);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl TimelineReloader for WatchReloader {
    fn reload_timelines(&self, kind: &str) {
        self.sender.send_modify(|generation| *generation += 1);
        tracing::debug!(kind, generation = self.generation(), "requested timeline reload");
    }
}

/// Bridge between the app's note list and the widget's shared store.
#[derive(Clone)]
pub struct WidgetCache {
    store: Arc<dyn SharedStore>,
    reloader: Arc<dyn TimelineReloader>,
}

impl WidgetCache {
    pub fn new(store: Arc<dyn SharedStore>, reloader: Arc<dyn TimelineReloader>) -> Self {
        Self { store, reloader }
    }

    /// Persists the snapshot, then requests a widget reload.
    pub fn save(&self, snapshot: &WidgetCacheSnapshot) -> Result<()> {
        let payload = serde_json::to_vec(snapshot)?;
        self.store.write(WIDGET_CACHE_KEY, &payload)?;
        self.reloader.reload_timelines(WIDGET_KIND);
        Ok(())
    }

    /// Reads the last snapshot; anything missing or unreadable yields an empty one.
    pub fn load(&self) -> WidgetCacheSnapshot {
        let payload = match self.store.read(WIDGET_CACHE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return WidgetCacheSnapshot::default(),
            Err(error) => {
                tracing::warn!("Failed to read widget cache: {}", error);
                return WidgetCacheSnapshot::default();
            }
        };

        match serde_json::from_slice::<WidgetCacheSnapshot>(&payload) {
            Ok(snapshot) => snapshot.bounded(),
            Err(error) => {
                tracing::warn!("Discarding unreadable widget cache: {}", error);
                WidgetCacheSnapshot::default()
            }
        }
    }
}
