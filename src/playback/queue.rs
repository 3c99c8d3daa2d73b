//! Pending playback queue
//!
//! Strict FIFO over resolved tracks. Owned exclusively by the controller's
//! actor task; items leave only by dequeue-for-play or bulk clear.

use std::collections::VecDeque;
use std::path::PathBuf;
use uuid::Uuid;

/// A resolved resource reference, immutable once created
#[derive(Debug, Clone)]
pub struct QueueItem {
    /// Queue item UUID, assigned at enqueue time
    pub id: Uuid,

    /// Display name (what the user asked for)
    pub name: String,

    /// Resolved resource handle
    pub path: PathBuf,
}

impl QueueItem {
    /// Create a new item from a resolved name/path pair
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// FIFO queue of pending tracks
#[derive(Debug, Default)]
pub struct PlayQueue {
    items: VecDeque<QueueItem>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an item to the tail
    pub fn enqueue(&mut self, item: QueueItem) {
        self.items.push_back(item);
    }

    /// Remove and return the head, if any
    ///
    /// Non-blocking poll semantics; the caller decides whether `None` means
    /// "go idle".
    pub fn dequeue(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    /// Remove all pending items, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let cleared = self.items.len();
        self.items.clear();
        cleared
    }

    /// Non-destructive ordered copy of the current contents
    ///
    /// The returned vector is a copy-on-read snapshot; later queue mutation
    /// does not affect it.
    pub fn snapshot(&self) -> Vec<QueueItem> {
        self.items.iter().cloned().collect()
    }

    /// Number of pending items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue has no pending items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
