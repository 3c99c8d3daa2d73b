//! Playback controller
//!
//! The state machine that owns the "now playing" slot, the busy signal, and
//! the advance loop. All mutable playback state lives inside a single actor
//! task; the public [`PlaybackController`] handle talks to it over a bounded
//! mpsc command channel and gets replies over oneshots. Sink completions are
//! marshalled back through the same command channel, so check-and-set of the
//! busy signal and the dequeue-and-hand-off step can never interleave — at
//! most one advance pass is in flight at any time.

use crate::catalog::ResourceCatalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{EventBus, PlayerEvent};
use crate::playback::queue::{PlayQueue, QueueItem};
use crate::playback::state::{NowPlaying, PlayerState, PlayerStatus, TrackInfo};
use crate::session::SessionBinding;
use crate::sink::{PlaybackOutcome, PlaybackSink};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a skip request actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipAction {
    /// Sink was playing and received a stop; completion will drive advance
    Stopped,
    /// Busy signal was set but the sink reported inactive; state was
    /// force-cleared and advance re-run directly
    Forced,
    /// Nothing was playing
    NotPlaying,
}

/// Commands processed by the controller task
enum Command {
    Play {
        binding: Arc<dyn SessionBinding>,
        item: QueueItem,
        reply: oneshot::Sender<usize>,
    },
    Stop {
        reply: oneshot::Sender<usize>,
    },
    Skip {
        reply: oneshot::Sender<SkipAction>,
    },
    Leave {
        reply: oneshot::Sender<usize>,
    },
    Status {
        reply: oneshot::Sender<PlayerStatus>,
    },
    /// Sink completion, relayed back onto the owning task
    Finished {
        id: Uuid,
        outcome: PlaybackOutcome,
    },
}

/// Handle to the playback controller actor
///
/// Cloneable; all clones talk to the same actor task. The actor shuts down
/// when every handle has been dropped.
#[derive(Clone)]
pub struct PlaybackController {
    commands: mpsc::Sender<Command>,
    catalog: Arc<dyn ResourceCatalog>,
    events: EventBus,
}

impl PlaybackController {
    /// Spawn the controller task and return a handle to it
    pub fn spawn(
        catalog: Arc<dyn ResourceCatalog>,
        sink: Arc<dyn PlaybackSink>,
        config: &Config,
    ) -> Self {
        let events = EventBus::new(config.event_capacity);
        let (tx, rx) = mpsc::channel(config.command_capacity);

        let task = ControllerTask {
            commands: rx,
            command_tx: tx.clone(),
            sink,
            events: events.clone(),
            queue: PlayQueue::new(),
            session: None,
            busy: false,
            now_playing: None,
        };
        tokio::spawn(task.run());

        Self {
            commands: tx,
            catalog,
            events,
        }
    }

    /// Resolve a name, enqueue it, and start playback if idle
    ///
    /// Returns the pending queue length after the add. The binding becomes
    /// the active session for subsequent playback attempts.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the name does not resolve; the controller
    /// state is untouched in that case.
    pub async fn play(
        &self,
        binding: Arc<dyn SessionBinding>,
        name: &str,
    ) -> Result<usize> {
        let path = self.catalog.resolve(name)?;
        let item = QueueItem::new(name, path);
        self.request(|reply| Command::Play {
            binding,
            item,
            reply,
        })
        .await
    }

    /// Stop playback and drain the pending queue
    ///
    /// Returns the number of pending items cleared. Safe to call when idle.
    pub async fn stop(&self) -> Result<usize> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// Skip the current track
    pub async fn skip(&self) -> Result<SkipAction> {
        self.request(|reply| Command::Skip { reply }).await
    }

    /// Stop, drain the queue, and release the session binding
    ///
    /// Idempotent: a second call with no bound session clears nothing and
    /// emits nothing.
    pub async fn leave(&self) -> Result<usize> {
        self.request(|reply| Command::Leave { reply }).await
    }

    /// Current state, now-playing info, and queue snapshot
    pub async fn status(&self) -> Result<PlayerStatus> {
        self.request(|reply| Command::Status { reply }).await
    }

    /// Catalog suggestions for interactive completion
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        self.catalog.suggest(partial)
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// The controller's event bus
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(make(reply_tx))
            .await
            .map_err(|_| Error::Shutdown)?;
        reply_rx.await.map_err(|_| Error::Shutdown)
    }
}

/// The actor owning all mutable playback state
struct ControllerTask {
    commands: mpsc::Receiver<Command>,
    /// Cloned for completion relay tasks
    command_tx: mpsc::Sender<Command>,
    sink: Arc<dyn PlaybackSink>,
    events: EventBus,
    queue: PlayQueue,
    session: Option<Arc<dyn SessionBinding>>,
    /// The mutual-exclusion gate: set iff a playback attempt is active
    busy: bool,
    now_playing: Option<NowPlaying>,
}

impl ControllerTask {
    async fn run(mut self) {
        debug!("Playback controller task started");
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }
        debug!("Playback controller task stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Play {
                binding,
                item,
                reply,
            } => self.handle_play(binding, item, reply),
            Command::Stop { reply } => {
                let cleared = self.stop_and_drain();
                let _ = reply.send(cleared);
            }
            Command::Skip { reply } => self.handle_skip(reply),
            Command::Leave { reply } => self.handle_leave(reply),
            Command::Status { reply } => {
                let _ = reply.send(self.status());
            }
            Command::Finished { id, outcome } => self.handle_finished(id, outcome),
        }
    }

    fn handle_play(
        &mut self,
        binding: Arc<dyn SessionBinding>,
        item: QueueItem,
        reply: oneshot::Sender<usize>,
    ) {
        self.session = Some(binding);

        info!("Enqueued '{}'", item.name);
        self.events.emit(PlayerEvent::TrackEnqueued {
            id: item.id,
            name: item.name.clone(),
            queue_len: self.queue.len() + 1,
            timestamp: chrono::Utc::now(),
        });
        self.queue.enqueue(item);
        let _ = reply.send(self.queue.len());

        // Enqueue-then-maybe-start: with all entry points serialized on this
        // task, exactly one concurrent play request finds busy unset.
        if !self.busy {
            self.advance();
        }
    }

    fn handle_skip(&mut self, reply: oneshot::Sender<SkipAction>) {
        if self.sink.is_active() {
            // Stopping triggers the completion, which drives one advance.
            self.sink.stop();
            let _ = reply.send(SkipAction::Stopped);
        } else if self.busy {
            // Stuck state: busy flagged but the sink says nothing is playing.
            // The completion may never come, so recover directly.
            warn!("Busy signal set but sink inactive; forcing advance");
            self.busy = false;
            if let Some(stuck) = self.now_playing.take() {
                self.events.emit(PlayerEvent::TrackFailed {
                    id: stuck.id,
                    name: stuck.name,
                    reason: "sink unresponsive, forced skip".to_string(),
                    timestamp: chrono::Utc::now(),
                });
            }
            let _ = reply.send(SkipAction::Forced);
            self.advance();
        } else {
            let _ = reply.send(SkipAction::NotPlaying);
        }
    }

    fn handle_leave(&mut self, reply: oneshot::Sender<usize>) {
        let Some(session) = self.session.take() else {
            // Already released; nothing to do, no events.
            let _ = reply.send(0);
            return;
        };

        let cleared = self.stop_and_drain();
        info!("Released session {}", session.channel_id());
        self.events.emit(PlayerEvent::SessionReleased {
            channel_id: session.channel_id(),
            timestamp: chrono::Utc::now(),
        });
        let _ = reply.send(cleared);
    }

    fn handle_finished(&mut self, id: Uuid, outcome: PlaybackOutcome) {
        let current = match &self.now_playing {
            Some(np) if np.id == id => np.clone(),
            _ => {
                // Completion for a track that was force-skipped or otherwise
                // already dismissed.
                debug!("Ignoring stale completion for {}", id);
                return;
            }
        };

        self.busy = false;
        self.now_playing = None;

        match outcome {
            PlaybackOutcome::Completed => {
                info!("Finished '{}'", current.name);
                self.events.emit(PlayerEvent::TrackFinished {
                    id: current.id,
                    name: current.name,
                    timestamp: chrono::Utc::now(),
                });
            }
            PlaybackOutcome::Failed(reason) => {
                warn!("Playback of '{}' failed: {}", current.name, reason);
                self.events.emit(PlayerEvent::TrackFailed {
                    id: current.id,
                    name: current.name,
                    reason,
                    timestamp: chrono::Utc::now(),
                });
            }
        }

        // Every completion drives exactly one advance pass, whatever the
        // outcome was.
        self.advance();
    }

    /// The core loop: go idle, or hand the next item to the sink
    ///
    /// Runs on this task only, and only while the busy signal is unset. A
    /// synchronous hand-off rejection drops the item and continues with the
    /// next one; a bad item never stalls the queue.
    fn advance(&mut self) {
        loop {
            if !self.session_live() {
                if !self.queue.is_empty() {
                    debug!(
                        "No live session; going idle with {} pending items retained",
                        self.queue.len()
                    );
                }
                self.go_idle();
                return;
            }

            let Some(item) = self.queue.dequeue() else {
                self.go_idle();
                return;
            };

            self.busy = true;
            let (done_tx, done_rx) = oneshot::channel();
            match self.sink.play(&item, done_tx) {
                Ok(()) => {
                    info!("Now playing '{}'", item.name);
                    self.now_playing = Some(NowPlaying {
                        id: item.id,
                        name: item.name.clone(),
                        started_at: chrono::Utc::now(),
                    });
                    self.events.emit(PlayerEvent::TrackStarted {
                        id: item.id,
                        name: item.name,
                        timestamp: chrono::Utc::now(),
                    });

                    // Relay the completion back onto this task. A dropped
                    // sender counts as a failure so the loop cannot stall.
                    let tx = self.command_tx.clone();
                    let id = item.id;
                    tokio::spawn(async move {
                        let outcome = done_rx.await.unwrap_or_else(|_| {
                            PlaybackOutcome::Failed(
                                "sink dropped completion channel".to_string(),
                            )
                        });
                        let _ = tx.send(Command::Finished { id, outcome }).await;
                    });
                    return;
                }
                Err(e) => {
                    warn!("Hand-off failed for '{}': {}", item.name, e);
                    self.events.emit(PlayerEvent::TrackFailed {
                        id: item.id,
                        name: item.name,
                        reason: e.to_string(),
                        timestamp: chrono::Utc::now(),
                    });
                    self.busy = false;
                    // Try the next item.
                }
            }
        }
    }

    /// Stop the sink if active and drain the queue; shared by stop and leave
    fn stop_and_drain(&mut self) -> usize {
        if self.sink.is_active() {
            // One stop instruction; the resulting completion clears the busy
            // signal and runs one advance pass over the (now empty) queue.
            self.sink.stop();
        } else if self.busy {
            // Stuck busy signal with nothing actually playing.
            self.busy = false;
            self.now_playing = None;
        }

        let cleared = self.queue.clear();
        info!("Stopped playback, cleared {} pending items", cleared);
        self.events.emit(PlayerEvent::QueueCleared {
            cleared,
            timestamp: chrono::Utc::now(),
        });
        cleared
    }

    fn session_live(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.is_connected())
            .unwrap_or(false)
    }

    fn go_idle(&mut self) {
        self.busy = false;
        self.now_playing = None;
        self.events.emit(PlayerEvent::PlayerIdle {
            timestamp: chrono::Utc::now(),
        });
    }

    fn status(&self) -> PlayerStatus {
        let state = if self.busy {
            PlayerState::Playing
        } else {
            PlayerState::Idle
        };
        PlayerStatus {
            state,
            now_playing: self.now_playing.clone(),
            queue: self.queue.snapshot().iter().map(TrackInfo::from).collect(),
        }
    }
}
