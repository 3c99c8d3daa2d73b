//! Name → resource catalog
//!
//! Maps user-supplied track names to playable resource handles and supplies
//! substring matches for interactive completion. The storage layout behind a
//! catalog is its own concern; the controller only sees the trait.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Hard cap on suggestion results, mirroring the front-end's choice-list limit
pub const SUGGESTION_LIMIT: usize = 25;

/// Resolves track names to resource handles
pub trait ResourceCatalog: Send + Sync {
    /// Resolve a name to a playable resource path
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no resource matches the name.
    fn resolve(&self, name: &str) -> Result<PathBuf>;

    /// Names matching `partial` for interactive completion
    ///
    /// Case-insensitive substring match, at most [`SUGGESTION_LIMIT`] names.
    fn suggest(&self, partial: &str) -> Vec<String>;
}

/// Catalog backed by a flat folder of media files
///
/// Resolves a plain file name inside the configured root folder. Names
/// containing path separators are rejected so a request can never escape
/// the library root.
pub struct FolderCatalog {
    root: PathBuf,
    suggestion_limit: usize,
}

impl FolderCatalog {
    /// Create a catalog over the given root folder
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suggestion_limit: SUGGESTION_LIMIT,
        }
    }

    /// Override the suggestion cap (still clamped to [`SUGGESTION_LIMIT`])
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit.min(SUGGESTION_LIMIT);
        self
    }

    /// Root folder this catalog serves
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File names directly under the root folder
    fn list_files(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read library root {:?}: {}", self.root, e);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

impl ResourceCatalog for FolderCatalog {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        // A bare file name only; anything with separators could walk out of
        // the library root.
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::NotFound(name.to_string()));
        }

        let path = self.root.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::NotFound(name.to_string()))
        }
    }

    fn suggest(&self, partial: &str) -> Vec<String> {
        let needle = partial.to_lowercase();
        self.list_files()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(self.suggestion_limit)
            .collect()
    }
}
