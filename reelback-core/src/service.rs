use chrono::Utc;
use reelback_model::BacklogEvent;
use tracing::{info, instrument};

use crate::aggregate::{BacklogAggregator, BacklogOptions, LibraryBacklog};
use crate::events::BacklogEventSink;
use crate::store::ShowStore;

/// Ties the storage and notification collaborators to the aggregator.
#[derive(Debug)]
pub struct BacklogService<S, E> {
    store: S,
    events: E,
}

impl<S, E> BacklogService<S, E>
where
    S: ShowStore,
    E: BacklogEventSink,
{
    pub fn new(store: S, events: E) -> Self {
        Self { store, events }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Aggregates a consistent snapshot of the library and announces the
    /// per-show counts and library totals.
    #[instrument(
        skip_all,
        fields(period = ?options.period, status = ?options.status)
    )]
    pub fn overview(&self, options: &BacklogOptions) -> LibraryBacklog {
        let shows = self.store.snapshot();
        let backlog = BacklogAggregator::new(*options).aggregate_library(&shows);

        let emitted_at = Utc::now();
        for show in &backlog.shows {
            self.events.publish(BacklogEvent::BacklogUpdated {
                show_id: show.show_id,
                counts: show.counts.as_map().clone(),
                emitted_at,
            });
        }
        self.events.publish(BacklogEvent::LibraryTotals {
            wanted: backlog.total_wanted,
            qual: backlog.total_qual,
            emitted_at,
        });

        info!(
            shows = backlog.shows.len(),
            wanted = backlog.total_wanted,
            qual = backlog.total_qual,
            "Backlog overview built"
        );
        backlog
    }
}
