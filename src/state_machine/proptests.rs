//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("test-session")
}

fn append_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::AppendTurn { .. }))
        .count()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_request_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{8}".prop_map(String::from)
}

/// Text whose trimmed form is non-empty
fn arb_message_text() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[a-zA-Z][a-zA-Z ?!]{0,30}[ \t]{0,3}".prop_map(String::from)
}

/// Text made entirely of whitespace (including empty)
fn arb_whitespace_text() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}".prop_map(String::from)
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        arb_request_id().prop_map(|request_id| SessionState::AwaitingReply { request_id }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_message_text(), arb_request_id())
            .prop_map(|(text, request_id)| Event::UserMessage { text, request_id }),
        (arb_request_id(), arb_message_text())
            .prop_map(|(request_id, text)| Event::ReplyReady { request_id, text }),
        (arb_request_id(), arb_message_text())
            .prop_map(|(request_id, message)| Event::ReplyFailed {
                request_id,
                message
            }),
        Just(Event::Reset),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Any non-empty trimmed text appends exactly one user turn and sets
    /// the pending flag.
    #[test]
    fn prop_send_appends_one_turn_and_sets_pending(
        text in arb_message_text(),
        request_id in arb_request_id(),
    ) {
        let result = transition(
            &SessionState::Idle,
            &test_context(),
            Event::UserMessage { text: text.clone(), request_id: request_id.clone() },
        ).unwrap();

        prop_assert!(result.new_state.is_pending());
        prop_assert_eq!(append_count(&result.effects), 1);
        prop_assert_eq!(&result.effects[0], &Effect::user_turn(text));
        prop_assert!(
            result.effects.contains(&Effect::RequestReply { request_id }),
            "expected a RequestReply effect"
        );
    }

    /// Whitespace-only text fails without effects, regardless of state.
    #[test]
    fn prop_whitespace_never_mutates(
        state in arb_state(),
        text in arb_whitespace_text(),
        request_id in arb_request_id(),
    ) {
        let result = transition(
            &state,
            &test_context(),
            Event::UserMessage { text, request_id },
        );
        match state {
            SessionState::Idle => {
                prop_assert!(matches!(result, Err(TransitionError::EmptyMessage)));
            }
            // Busy wins over validation; neither path mutates
            SessionState::AwaitingReply { .. } => {
                prop_assert!(matches!(result, Err(TransitionError::ReplyPending)));
            }
        }
    }

    /// A matching completion appends exactly one bot turn and clears pending.
    #[test]
    fn prop_completion_appends_one_turn_and_clears_pending(
        request_id in arb_request_id(),
        text in arb_message_text(),
    ) {
        let state = SessionState::AwaitingReply { request_id: request_id.clone() };
        let result = transition(
            &state,
            &test_context(),
            Event::ReplyReady { request_id, text },
        ).unwrap();

        prop_assert_eq!(&result.new_state, &SessionState::Idle);
        prop_assert_eq!(append_count(&result.effects), 1);
        prop_assert!(
            result.effects.contains(&Effect::NotifyState { pending: false }),
            "expected a NotifyState effect with pending: false"
        );
    }

    /// Failed replies also resolve to Idle; pending never sticks.
    #[test]
    fn prop_failure_resolves_to_idle(
        request_id in arb_request_id(),
        message in arb_message_text(),
    ) {
        let state = SessionState::AwaitingReply { request_id: request_id.clone() };
        let result = transition(
            &state,
            &test_context(),
            Event::ReplyFailed { request_id, message },
        ).unwrap();

        prop_assert!(!result.new_state.is_pending());
        prop_assert_eq!(append_count(&result.effects), 1);
    }

    /// Reply events only land in AwaitingReply with the matching request id.
    #[test]
    fn prop_mismatched_reply_is_rejected(
        pending_id in arb_request_id(),
        reply_id in arb_request_id(),
        text in arb_message_text(),
    ) {
        prop_assume!(pending_id != reply_id);
        let state = SessionState::AwaitingReply { request_id: pending_id };
        let result = transition(
            &state,
            &test_context(),
            Event::ReplyReady { request_id: reply_id, text },
        );
        prop_assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }

    /// The transition function never panics and, when it fails, emits no
    /// effects (errors never mutate).
    #[test]
    fn prop_transition_total_and_errors_are_inert(
        state in arb_state(),
        event in arb_event(),
    ) {
        // An Err carries no effects by construction; the assertion here is
        // that every (state, event) pair is handled without panicking.
        let _ = transition(&state, &test_context(), event);
    }

    /// Every successful transition publishes a pending flag consistent with
    /// the state it lands in.
    #[test]
    fn prop_notify_state_matches_new_state(
        state in arb_state(),
        event in arb_event(),
    ) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            for effect in &result.effects {
                if let Effect::NotifyState { pending } = effect {
                    prop_assert_eq!(*pending, result.new_state.is_pending());
                }
            }
        }
    }

    /// RequestReply only ever accompanies a transition into AwaitingReply,
    /// so at most one reply is in flight.
    #[test]
    fn prop_request_reply_only_when_awaiting(
        state in arb_state(),
        event in arb_event(),
    ) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            let requests = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestReply { .. }))
                .count();
            if requests > 0 {
                prop_assert_eq!(requests, 1);
                prop_assert!(result.new_state.is_pending());
            }
        }
    }

    /// Reset always lands in Idle and clears the transcript.
    #[test]
    fn prop_reset_lands_idle(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::Reset).unwrap();
        prop_assert_eq!(&result.new_state, &SessionState::Idle);
        prop_assert!(result.effects.contains(&Effect::ClearTranscript));
        prop_assert_eq!(
            result.effects.contains(&Effect::AbortReply),
            state.is_pending()
        );
    }
}
