//! Playback sink interface
//!
//! The opaque decoding/transport engine. It accepts a resource handle plus a
//! completion channel, can be told to stop, and reports exactly one outcome
//! per accepted hand-off — success or failure, never both, never neither.
//! The outcome may arrive from any thread or task; the controller marshals
//! it back onto its own task before reacting.

use crate::error::Result;
use crate::playback::queue::QueueItem;
use tokio::sync::oneshot;

/// Final outcome of one playback attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Track played to the end, or was stopped/skipped
    Completed,
    /// Sink-reported failure during playback
    Failed(String),
}

/// One-shot channel the sink uses to report the outcome of a hand-off
pub type CompletionSender = oneshot::Sender<PlaybackOutcome>;

/// Opaque playback engine accepting one track at a time
pub trait PlaybackSink: Send + Sync {
    /// Begin playing a track
    ///
    /// On acceptance the sink must eventually send exactly one
    /// [`PlaybackOutcome`] on `done`. A synchronous `Err` means the hand-off
    /// was rejected and `done` will never fire; the caller treats that the
    /// same as an asynchronous failure.
    fn play(&self, item: &QueueItem, done: CompletionSender) -> Result<()>;

    /// Stop the current track, if any
    ///
    /// Stopping triggers the pending completion; it is the only cancellation
    /// primitive.
    fn stop(&self);

    /// Whether a track is currently playing
    fn is_active(&self) -> bool;
}
