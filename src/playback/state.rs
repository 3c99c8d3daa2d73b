//! Playback state types

use crate::playback::queue::QueueItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Controller state
///
/// The transitional moment between a completion and the next hand-off is not
/// observable: state reads are commands processed by the same task that runs
/// the advance loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Playing,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Playing => write!(f, "playing"),
        }
    }
}

/// Currently playing track information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NowPlaying {
    pub id: Uuid,
    pub name: String,
    /// When the hand-off succeeded
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Queue entry summary for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: Uuid,
    pub name: String,
}

impl From<&QueueItem> for TrackInfo {
    fn from(item: &QueueItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

/// Full controller status for the front-end's list command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub state: PlayerState,
    pub now_playing: Option<NowPlaying>,
    /// Pending queue snapshot, in play order
    pub queue: Vec<TrackInfo>,
}
