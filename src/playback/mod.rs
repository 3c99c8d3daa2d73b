//! Queue-and-playback state machine
//!
//! [`queue`] holds the pending FIFO, [`state`] the observable state types,
//! and [`controller`] the actor that serializes every playback decision.

pub mod controller;
pub mod queue;
pub mod state;

pub use controller::{PlaybackController, SkipAction};
pub use queue::{PlayQueue, QueueItem};
pub use state::{NowPlaying, PlayerState, PlayerStatus, TrackInfo};
