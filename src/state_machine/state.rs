//! Session state types

use serde::{Deserialize, Serialize};

/// Session state
///
/// `Idle --UserMessage--> AwaitingReply --ReplyReady/ReplyFailed--> Idle`.
/// There is no terminal state; a session lives until it is torn down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for user input, no reply in flight
    #[default]
    Idle,

    /// A user turn has been appended and its reply has not resolved yet
    ///
    /// `request_id` ties the pending reply to its completion event so a
    /// stale or duplicate completion cannot mutate the session.
    AwaitingReply { request_id: String },
}

impl SessionState {
    /// Whether a reply has been requested but not yet resolved
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::AwaitingReply { .. })
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}
