//! Pure state transition function

use super::{Effect, Event, SessionContext, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Empty or whitespace-only input; the session is left untouched
    #[error("Message is empty")]
    EmptyMessage,
    /// A reply is already in flight; callers disable send while pending
    #[error("A reply is already pending, wait for it to resolve")]
    ReplyPending,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs this always produces the same outputs, with no I/O
/// side effects. All session invariants are enforced here: the transcript
/// only grows through effects this function emits, and `AwaitingReply` is
/// entered and left in lockstep with the user/bot turn pair.
pub fn transition(
    state: &SessionState,
    _context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User message handling
        // ============================================================

        // Idle + UserMessage -> AwaitingReply
        (SessionState::Idle, Event::UserMessage { text, request_id }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(TransitionResult::new(SessionState::AwaitingReply {
                request_id: request_id.clone(),
            })
            .with_effect(Effect::user_turn(text))
            .with_effect(Effect::NotifyState { pending: true })
            .with_effect(Effect::RequestReply { request_id }))
        }

        // AwaitingReply + UserMessage -> reject (one reply in flight at most)
        (SessionState::AwaitingReply { .. }, Event::UserMessage { .. }) => {
            Err(TransitionError::ReplyPending)
        }

        // ============================================================
        // Reply resolution
        // ============================================================

        // AwaitingReply + matching ReplyReady -> Idle
        (SessionState::AwaitingReply { request_id }, Event::ReplyReady { request_id: rid, text })
            if rid == *request_id =>
        {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::bot_turn(text))
                .with_effect(Effect::NotifyState { pending: false })
                .with_effect(Effect::NotifyReplyDone))
        }

        // AwaitingReply + matching ReplyFailed -> Idle with an error turn.
        // Pending must always resolve, even on failure.
        (
            SessionState::AwaitingReply { request_id },
            Event::ReplyFailed {
                request_id: rid,
                message,
            },
        ) if rid == *request_id => Ok(TransitionResult::new(SessionState::Idle)
            .with_effect(Effect::error_turn(message))
            .with_effect(Effect::NotifyState { pending: false })
            .with_effect(Effect::NotifyReplyDone)),

        // ============================================================
        // Reset (new chat)
        // ============================================================

        (SessionState::Idle, Event::Reset) => Ok(TransitionResult::new(SessionState::Idle)
            .with_effect(Effect::ClearTranscript)
            .with_effect(Effect::NotifyState { pending: false })),

        // Resetting mid-reply aborts the generation before clearing
        (SessionState::AwaitingReply { .. }, Event::Reset) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::AbortReply)
                .with_effect(Effect::ClearTranscript)
                .with_effect(Effect::NotifyState { pending: false }))
        }

        // ============================================================
        // Invalid transitions
        // ============================================================

        // Covers double completion (reply events while Idle) and stale
        // completions whose request_id no longer matches.
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}
