//! Runtime for executing sessions
//!
//! One tokio task per session applies pure transitions and executes their
//! effects: appending turns, spawning reply generation, cancelling it on
//! reset or teardown, and broadcasting [`UiEvent`]s to observers.

mod executor;
pub mod traits;


pub use executor::SessionRuntime;
pub use traits::TranscriptStore;

use crate::reply::ReplyGenerator;
use crate::session::{InMemoryTranscript, Snapshot};
use crate::state_machine::{Event, SessionContext, SessionState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 32;
const BROADCAST_CHANNEL_CAPACITY: usize = 128;

/// Events sent to UI observers
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A turn was appended to the transcript
    TurnAdded { turn: crate::session::Turn },
    /// The pending flag changed
    StateChange { pending: bool },
    /// The transcript was cleared (new chat)
    TranscriptCleared,
    /// A reply cycle finished (successfully or not)
    ReplyDone,
    /// A user-facing rejection, e.g. sending while a reply is pending
    Error { message: String },
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    transcript: Arc<InMemoryTranscript>,
    state_rx: watch::Receiver<SessionState>,
    shutdown: CancellationToken,
}

impl SessionHandle {
    /// Append a user turn and request a simulated reply
    ///
    /// Empty input and sends during a pending reply are rejected inside the
    /// runtime; this only fails when the session has been torn down.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), String> {
        let event = Event::UserMessage {
            text: text.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        };
        self.send_event(event).await
    }

    /// Start a new chat: abort any pending reply and clear the transcript
    pub async fn reset(&self) -> Result<(), String> {
        self.send_event(Event::Reset).await
    }

    pub(crate) async fn send_event(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Read-only snapshot for rendering; no side effects
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turns: self.transcript.snapshot_turns(),
            pending: self.is_pending(),
        }
    }

    /// Whether a reply has been requested but not yet resolved
    pub fn is_pending(&self) -> bool {
        self.state_rx.borrow().is_pending()
    }

    /// Subscribe to UI events for this session
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.broadcast_tx.subscribe()
    }
}

/// Manager for all session runtimes
pub struct SessionManager<G: ReplyGenerator + 'static> {
    generator: Arc<G>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl<G: ReplyGenerator + 'static> SessionManager<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator: Arc::new(generator),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create a runtime for a session
    pub async fn get_or_create(&self, session_id: &str) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(session_id) {
                return handle.clone();
            }
        }

        let context = SessionContext::new(session_id);
        let transcript = Arc::new(InMemoryTranscript::new());
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
        // Every session starts idle with an empty transcript
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let shutdown = CancellationToken::new();

        let runtime = SessionRuntime::new(
            context,
            SessionState::Idle,
            transcript.clone(),
            self.generator.clone(),
            event_rx,
            event_tx.clone(),
            broadcast_tx.clone(),
            state_tx,
            shutdown.clone(),
        );

        let id = session_id.to_string();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %id, "Session runtime finished");
        });

        let handle = SessionHandle {
            event_tx,
            broadcast_tx,
            transcript,
            state_rx,
            shutdown,
        };

        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), handle.clone());

        handle
    }

    /// Send an event to a session
    pub async fn send_event(&self, session_id: &str, event: Event) -> Result<(), String> {
        let handle = self.get_or_create(session_id).await;
        handle.send_event(event).await
    }

    /// Subscribe to a session's UI events
    pub async fn subscribe(&self, session_id: &str) -> broadcast::Receiver<UiEvent> {
        let handle = self.get_or_create(session_id).await;
        handle.subscribe()
    }

    /// Tear a session down, cancelling any pending reply
    pub async fn close(&self, session_id: &str) -> bool {
        let handle = self.sessions.write().await.remove(session_id);
        match handle {
            Some(handle) => {
                handle.shutdown.cancel();
                true
            }
            None => false,
        }
    }

    /// Tear every session down (navigation away from the chat surface)
    pub async fn shutdown(&self) {
        let mut sessions = self.sessions.write().await;
        for (session_id, handle) in sessions.drain() {
            tracing::info!(session_id = %session_id, "Closing session");
            handle.shutdown.cancel();
        }
    }
}
