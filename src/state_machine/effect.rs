//! Effects produced by state transitions

use crate::session::Sender;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn {
        sender: Sender,
        text: String,
        error: bool,
    },

    /// Spawn reply generation for the pending request
    RequestReply { request_id: String },

    /// Cancel the in-flight reply generation
    AbortReply,

    /// Drop every turn (new chat)
    ClearTranscript,

    /// Publish the new pending flag to observers
    NotifyState { pending: bool },

    /// Tell observers the reply cycle finished
    NotifyReplyDone,
}

impl Effect {
    pub fn user_turn(text: impl Into<String>) -> Self {
        Effect::AppendTurn {
            sender: Sender::User,
            text: text.into(),
            error: false,
        }
    }

    pub fn bot_turn(text: impl Into<String>) -> Self {
        Effect::AppendTurn {
            sender: Sender::Bot,
            text: text.into(),
            error: false,
        }
    }

    /// Bot-authored turn carrying a reply-generation failure
    pub fn error_turn(message: impl Into<String>) -> Self {
        Effect::AppendTurn {
            sender: Sender::Bot,
            text: message.into(),
            error: true,
        }
    }
}
