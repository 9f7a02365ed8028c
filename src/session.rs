//! Session data types and the in-memory transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single message in the transcript; immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
    /// Set on bot turns that report a failed reply generation
    #[serde(default)]
    pub error: bool,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            error: false,
            created_at: Utc::now(),
        }
    }

    /// Bot-authored turn carrying a reply-generation failure
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            error: true,
            created_at: Utc::now(),
        }
    }
}

/// Read-only view of a session for rendering
///
/// `pending` is the signal callers use to disable the send affordance;
/// the runtime rejects sends while a reply is in flight, but the contract
/// is cooperative.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub turns: Vec<Turn>,
    pub pending: bool,
}

/// Append-only in-memory transcript
///
/// The session is memory-resident only; this is the production store, not a
/// test double. Turns are ordered by append time and that order is the
/// render order.
#[derive(Debug, Default)]
pub struct InMemoryTranscript {
    turns: Mutex<Vec<Turn>>,
}

impl InMemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous copy of the transcript, ordered by append time
    pub fn snapshot_turns(&self) -> Vec<Turn> {
        self.turns.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.turns.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&self, turn: Turn) {
        self.turns.lock().unwrap().push(turn);
    }

    pub(crate) fn clear_all(&self) {
        self.turns.lock().unwrap().clear();
    }
}
