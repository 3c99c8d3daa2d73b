//! Shared test doubles for controller integration tests

use playdeck::catalog::ResourceCatalog;
use playdeck::error::{Error, Result};
use playdeck::events::PlayerEvent;
use playdeck::playback::QueueItem;
use playdeck::session::SessionBinding;
use playdeck::sink::{CompletionSender, PlaybackOutcome, PlaybackSink};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;
use uuid::Uuid;

/// Catalog resolving every name except those starting with "nope"
pub struct StubCatalog;

impl ResourceCatalog for StubCatalog {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.starts_with("nope") {
            Err(Error::NotFound(name.to_string()))
        } else {
            Ok(PathBuf::from("/library").join(name))
        }
    }

    fn suggest(&self, _partial: &str) -> Vec<String> {
        Vec::new()
    }
}

struct SinkInner {
    pending: Option<(Uuid, String, CompletionSender)>,
    played: Vec<String>,
    stop_calls: usize,
}

/// Sink under full test control
///
/// Records hand-offs in order, holds each completion sender until the test
/// (or a stop instruction) releases it, and rejects tracks whose name
/// contains the configured substring to simulate hand-off failures.
pub struct ScriptedSink {
    inner: Mutex<SinkInner>,
    reject_substring: Option<String>,
}

impl ScriptedSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SinkInner {
                pending: None,
                played: Vec::new(),
                stop_calls: 0,
            }),
            reject_substring: None,
        })
    }

    /// Sink that rejects any track whose name contains `substring`
    pub fn rejecting(substring: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SinkInner {
                pending: None,
                played: Vec::new(),
                stop_calls: 0,
            }),
            reject_substring: Some(substring.to_string()),
        })
    }

    /// Complete the current track with the given outcome
    ///
    /// Returns false if nothing was pending.
    pub fn complete_current(&self, outcome: PlaybackOutcome) -> bool {
        match self.inner.lock().unwrap().pending.take() {
            Some((_, _, done)) => {
                let _ = done.send(outcome);
                true
            }
            None => false,
        }
    }

    /// Names handed off so far, in order
    pub fn played(&self) -> Vec<String> {
        self.inner.lock().unwrap().played.clone()
    }

    /// How many stop instructions the sink has received
    pub fn stop_calls(&self) -> usize {
        self.inner.lock().unwrap().stop_calls
    }

    /// Take the pending completion sender without firing it
    ///
    /// Leaves the sink reporting inactive while the controller still thinks
    /// a track is playing — the stuck state the forced-skip path recovers.
    pub fn suspend_current(&self) -> Option<CompletionSender> {
        self.inner
            .lock()
            .unwrap()
            .pending
            .take()
            .map(|(_, _, done)| done)
    }
}

impl PlaybackSink for ScriptedSink {
    fn play(&self, item: &QueueItem, done: CompletionSender) -> Result<()> {
        if let Some(needle) = &self.reject_substring {
            if item.name.contains(needle.as_str()) {
                return Err(Error::Handoff(format!(
                    "resource missing: {}",
                    item.path.display()
                )));
            }
        }
        let mut inner = self.inner.lock().unwrap();
        inner.played.push(item.name.clone());
        inner.pending = Some((item.id, item.name.clone(), done));
        Ok(())
    }

    fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.stop_calls += 1;
        if let Some((_, _, done)) = inner.pending.take() {
            let _ = done.send(PlaybackOutcome::Completed);
        }
    }

    fn is_active(&self) -> bool {
        self.inner.lock().unwrap().pending.is_some()
    }
}

/// Session binding whose connectivity the test can flip
pub struct ToggleBinding {
    connected: AtomicBool,
    id: Uuid,
}

impl ToggleBinding {
    pub fn connected() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(true),
            id: Uuid::new_v4(),
        })
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(false),
            id: Uuid::new_v4(),
        })
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl SessionBinding for ToggleBinding {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn channel_id(&self) -> Uuid {
        self.id
    }
}

/// Receive the next event, failing the test after five seconds
pub async fn next_event(rx: &mut broadcast::Receiver<PlayerEvent>) -> PlayerEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event bus closed")
}

/// Skip events until one matches the predicate, returning it
pub async fn wait_for(
    rx: &mut broadcast::Receiver<PlayerEvent>,
    mut matches: impl FnMut(&PlayerEvent) -> bool,
) -> PlayerEvent {
    loop {
        let event = next_event(rx).await;
        if matches(&event) {
            return event;
        }
    }
}

/// Wait until a TrackStarted for the given name is observed
pub async fn wait_for_started(rx: &mut broadcast::Receiver<PlayerEvent>, name: &str) {
    wait_for(rx, |event| {
        matches!(event, PlayerEvent::TrackStarted { name: n, .. } if n == name)
    })
    .await;
}
