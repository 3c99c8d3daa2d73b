//! Event types and event bus
//!
//! The controller reports everything the front-end needs to announce
//! (now-playing, failures, cleared counts) as broadcast events rather than
//! return values, so announcements don't couple the advance loop to any
//! particular chat or HTTP surface.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Playback events observable by the front-end
///
/// Events are broadcast via [`EventBus`] and serialize with a `type` tag for
/// transmission to whatever surface the embedder exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Track added to the pending queue
    TrackEnqueued {
        /// Queue item UUID
        id: Uuid,
        /// Display name
        name: String,
        /// Queue length after the add (pending items, excluding now-playing)
        queue_len: usize,
        /// When the track was enqueued
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Track handed to the sink and accepted (now-playing announcement)
    TrackStarted {
        id: Uuid,
        name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Track playback completed normally or via stop/skip
    TrackFinished {
        id: Uuid,
        name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Track dropped: hand-off failure or sink-reported playback error
    ///
    /// The loop advances past the failed track; this event is the only
    /// record of the failure.
    TrackFailed {
        id: Uuid,
        name: String,
        /// Human-readable failure reason
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Pending queue drained by stop/leave
    QueueCleared {
        /// Number of pending items removed
        cleared: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Controller went idle (queue exhausted or session gone)
    PlayerIdle {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Session binding released by leave
    SessionReleased {
        /// Identity of the released output channel
        channel_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl PlayerEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            PlayerEvent::TrackEnqueued { .. } => "TrackEnqueued",
            PlayerEvent::TrackStarted { .. } => "TrackStarted",
            PlayerEvent::TrackFinished { .. } => "TrackFinished",
            PlayerEvent::TrackFailed { .. } => "TrackFailed",
            PlayerEvent::QueueCleared { .. } => "QueueCleared",
            PlayerEvent::PlayerIdle { .. } => "PlayerIdle",
            PlayerEvent::SessionReleased { .. } => "SessionReleased",
        }
    }
}

/// Central event distribution bus
///
/// Wraps `tokio::broadcast`, providing non-blocking publish (slow subscribers
/// never block the controller), multiple concurrent subscribers, and
/// automatic cleanup when subscribers drop.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlayerEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether anyone is listening
    ///
    /// The controller never treats a missing front-end as an error; events
    /// are best-effort notifications.
    pub fn emit(&self, event: PlayerEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
