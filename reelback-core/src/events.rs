use std::sync::Mutex;

use reelback_model::BacklogEvent;
use tokio::sync::broadcast;
use tracing::trace;

use crate::config::BacklogConfig;

/// Notification collaborator. Publishing is fire-and-forget and must
/// never block the aggregation pass.
pub trait BacklogEventSink: Send + Sync {
    fn publish(&self, event: BacklogEvent);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl BacklogEventSink for NullEventSink {
    fn publish(&self, _event: BacklogEvent) {}
}

/// In-process fan-out of backlog events to any number of subscribers.
///
/// Backed by a bounded broadcast channel: events are dropped when nobody
/// listens, and slow subscribers skip the oldest entries.
#[derive(Debug)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<BacklogEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn from_config(config: &BacklogConfig) -> Self {
        Self::new(config.event_channel_capacity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BacklogEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl BacklogEventSink for BroadcastEventBus {
    fn publish(&self, event: BacklogEvent) {
        if self.sender.send(event).is_err() {
            trace!("No backlog subscribers, event dropped");
        }
    }
}

/// Sink that keeps every event, for embedding callers that poll.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<BacklogEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes everything recorded so far.
    pub fn drain(&self) -> Vec<BacklogEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl BacklogEventSink for RecordingEventSink {
    fn publish(&self, event: BacklogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
