//! Tracing initialization for embedding processes
//!
//! The library itself only emits `tracing` events; the embedding front-end
//! decides where they go. This helper wires up the usual subscriber stack
//! (env-filter over fmt) from the logging section of the config file.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Safe to call only
/// once per process; a second call panics in `tracing_subscriber`.
pub fn init(config: &LoggingConfig) {
    let default_filter = format!("playdeck={}", config.level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
