//! # playdeck
//!
//! Single-consumer sequential playback queue. Clients submit playable items
//! by name; playdeck resolves each name against a catalog, serializes
//! playback so exactly one item plays at a time, and auto-advances when the
//! current item finishes, fails, or is skipped/stopped.
//!
//! **Architecture:** one actor task owns all mutable playback state
//! ([`playback::PlaybackController`]); the catalog, the sink, and the
//! session binding are injected behind traits; everything the front-end
//! needs to announce is broadcast on an [`events::EventBus`].
//!
//! The chat/command front-end, the media decoding engine, and connection
//! bootstrap are external collaborators — this crate defines their
//! interfaces ([`catalog::ResourceCatalog`], [`sink::PlaybackSink`],
//! [`session::SessionBinding`]) and ships a filesystem-backed catalog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod playback;
pub mod session;
pub mod sink;

pub use config::Config;
pub use error::{Error, Result};
pub use events::{EventBus, PlayerEvent};
pub use playback::{PlaybackController, PlayerStatus, SkipAction};
