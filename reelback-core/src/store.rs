use std::sync::Arc;

use dashmap::DashMap;
use reelback_model::{QualitySet, Show, ShowId};
use tracing::{debug, warn};

use crate::error::Result;
use crate::preset::QualityPreset;

/// Read interface of the storage collaborator.
///
/// Implementations hand out immutable snapshots: a show returned here is
/// never mutated afterwards, updates replace the whole `Arc`.
pub trait ShowStore: Send + Sync {
    fn snapshot(&self) -> Vec<Arc<Show>>;

    fn get(&self, id: ShowId) -> Option<Arc<Show>>;
}

/// Concurrent in-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryShowStore {
    shows: DashMap<ShowId, Arc<Show>>,
}

impl InMemoryShowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, show: Show) {
        self.shows.insert(show.id, Arc::new(show));
    }

    pub fn remove(&self, id: ShowId) -> Option<Arc<Show>> {
        self.shows.remove(&id).map(|(_, show)| show)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// Returns whether the show exists.
    pub fn set_paused(&self, id: ShowId, paused: bool) -> bool {
        self.replace_with(id, |show| show.paused = paused)
    }

    /// Validates the new quality setting before swapping it in. On
    /// `InvalidPreset` the show keeps its previous setting.
    pub fn reconfigure_quality(
        &self,
        id: ShowId,
        allowed: QualitySet,
        preferred: QualitySet,
    ) -> Result<bool> {
        let preset = QualityPreset::new(allowed, preferred).inspect_err(|err| {
            warn!(show_id = %id, error = %err, "Rejected quality reconfiguration");
        })?;
        let updated = self.replace_with(id, |show| show.quality = preset.packed());
        if updated {
            debug!(show_id = %id, "Quality preset replaced");
        }
        Ok(updated)
    }

    fn replace_with(&self, id: ShowId, edit: impl FnOnce(&mut Show)) -> bool {
        match self.shows.get_mut(&id) {
            Some(mut slot) => {
                let mut next = Show::clone(&slot);
                edit(&mut next);
                *slot = Arc::new(next);
                true
            }
            None => false,
        }
    }
}

impl ShowStore for InMemoryShowStore {
    fn snapshot(&self) -> Vec<Arc<Show>> {
        self.shows.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    fn get(&self, id: ShowId) -> Option<Arc<Show>> {
        self.shows.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}
