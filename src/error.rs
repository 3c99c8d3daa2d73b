//! Error types for playdeck
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Every failure is terminal for the offending item, never for
//! the controller: the advance loop converts item-level errors into events
//! and keeps processing the queue.

use thiserror::Error;

/// Main error type for playdeck
#[derive(Error, Debug)]
pub enum Error {
    /// Name did not resolve to any catalog resource
    #[error("No track found matching '{0}'")]
    NotFound(String),

    /// Resource vanished or the sink rejected it between enqueue and dequeue
    #[error("Hand-off failed: {0}")]
    Handoff(String),

    /// Sink-reported failure during playback
    #[error("Playback error: {0}")]
    Playback(String),

    /// No live session binding when a playback attempt ran
    #[error("Not connected to a session")]
    NotConnected,

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Controller task is gone (handle outlived the actor)
    #[error("Playback controller has shut down")]
    Shutdown,
}

/// Convenience Result type using playdeck Error
pub type Result<T> = std::result::Result<T, Error>;
