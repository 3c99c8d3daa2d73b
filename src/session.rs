//! Session binding interface
//!
//! Represents the live output connection (a voice channel, a cast target)
//! the controller plays into. The connect/move/disconnect lifecycle belongs
//! to the front-end; the controller only ever reads liveness and must do so
//! before every playback attempt — a binding held across an await may have
//! disconnected in the meantime.

use uuid::Uuid;

/// Read-only view of the physical output connection
pub trait SessionBinding: Send + Sync {
    /// Whether the connection is currently live
    fn is_connected(&self) -> bool;

    /// Identity of the output channel this binding points at
    fn channel_id(&self) -> Uuid;
}
