//! Configuration for playdeck
//!
//! Loaded once at startup from a TOML file by the embedding front-end.
//! All values have built-in defaults so a minimal config only needs the
//! library root folder.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration loaded from TOML file
///
/// These settings cannot change during runtime. The embedding process must
/// restart to pick up changes.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root folder containing playable media files
    pub library_root: PathBuf,

    /// Maximum number of names returned by catalog suggestions
    ///
    /// Default: 25 (the front-end's choice-list limit)
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Event bus channel capacity
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Controller command channel capacity
    #[serde(default = "default_command_capacity")]
    pub command_capacity: usize,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_suggestion_limit() -> usize {
    25
}

fn default_event_capacity() -> usize {
    100
}

fn default_command_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let toml_str = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Config = toml::from_str(&toml_str)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Configuration with built-in defaults for the given library root
    pub fn with_library_root(library_root: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
            suggestion_limit: default_suggestion_limit(),
            event_capacity: default_event_capacity(),
            command_capacity: default_command_capacity(),
            logging: LoggingConfig::default(),
        }
    }
}
