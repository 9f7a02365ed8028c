//! Session runtime executor

use super::traits::TranscriptStore;
use super::UiEvent;

use crate::reply::ReplyGenerator;
use crate::session::Turn;
use crate::state_machine::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Generic session runtime that can work with any transcript store and
/// reply generator
pub struct SessionRuntime<S, G>
where
    S: TranscriptStore + Clone + 'static,
    G: ReplyGenerator + 'static,
{
    context: SessionContext,
    state: SessionState,
    transcript: S,
    generator: Arc<G>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    state_tx: watch::Sender<SessionState>,
    /// Cancelled by the manager on session teardown
    shutdown: CancellationToken,
    /// Token to cancel the in-flight reply generation
    reply_cancel: Option<CancellationToken>,
}

impl<S, G> SessionRuntime<S, G>
where
    S: TranscriptStore + Clone + 'static,
    G: ReplyGenerator + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: SessionContext,
        state: SessionState,
        transcript: S,
        generator: Arc<G>,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        broadcast_tx: broadcast::Sender<UiEvent>,
        state_tx: watch::Sender<SessionState>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            context,
            state,
            transcript,
            generator,
            event_rx,
            event_tx,
            broadcast_tx,
            state_tx,
            shutdown,
            reply_cancel: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting session runtime");

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                maybe_event = self.event_rx.recv() => {
                    let Some(event) = maybe_event else { break };
                    if let Err(e) = self.process_event(event).await {
                        tracing::error!(error = %e, "Error handling event");
                        let _ = self.broadcast_tx.send(UiEvent::Error { message: e });
                    }
                }
            }
        }

        // A reply still in flight must not outlive the session
        if let Some(token) = self.reply_cancel.take() {
            token.cancel();
        }

        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    async fn process_event(&mut self, event: Event) -> Result<(), String> {
        // Pure state transition
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(TransitionError::EmptyMessage) => {
                // Whitespace-only input is dropped without a user-visible error
                tracing::debug!(session_id = %self.context.session_id, "Ignoring empty message");
                return Ok(());
            }
            Err(e @ TransitionError::ReplyPending) => {
                // Callers are expected to use the pending flag to disable send
                tracing::warn!(
                    session_id = %self.context.session_id,
                    "Rejected message while a reply is pending"
                );
                let _ = self.broadcast_tx.send(UiEvent::Error {
                    message: e.to_string(),
                });
                return Ok(());
            }
            Err(e) => {
                // Stale or duplicate completion; the session stays untouched
                tracing::debug!(
                    session_id = %self.context.session_id,
                    error = %e,
                    "Dropping stale event"
                );
                return Ok(());
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect).await?;
        }

        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) -> Result<(), String> {
        match effect {
            Effect::AppendTurn {
                sender,
                text,
                error,
            } => {
                let turn = Turn {
                    sender,
                    text,
                    error,
                    created_at: Utc::now(),
                };
                let turn = self.transcript.append(turn).await?;
                let _ = self.broadcast_tx.send(UiEvent::TurnAdded { turn });
            }

            Effect::NotifyState { pending } => {
                let _ = self.state_tx.send(self.state.clone());
                let _ = self.broadcast_tx.send(UiEvent::StateChange { pending });
            }

            Effect::RequestReply { request_id } => {
                // Token is retained so reset and teardown can cancel the
                // generation before it mutates the session
                let cancel = CancellationToken::new();
                self.reply_cancel = Some(cancel.clone());

                let generator = Arc::clone(&self.generator);
                let transcript = self.transcript.clone();
                let event_tx = self.event_tx.clone();
                let session_id = self.context.session_id.clone();

                tokio::spawn(async move {
                    let history = match transcript.turns().await {
                        Ok(h) => h,
                        Err(e) => {
                            let _ = event_tx
                                .send(Event::ReplyFailed {
                                    request_id,
                                    message: e,
                                })
                                .await;
                            return;
                        }
                    };

                    tokio::select! {
                        biased;

                        () = cancel.cancelled() => {
                            tracing::debug!(session_id = %session_id, "Reply generation cancelled");
                        }

                        result = generator.generate(&history) => {
                            let event = match result {
                                Ok(text) => Event::ReplyReady { request_id, text },
                                Err(e) => Event::ReplyFailed {
                                    request_id,
                                    message: e.to_string(),
                                },
                            };
                            // Receiver may be gone if the session was torn down
                            let _ = event_tx.send(event).await;
                        }
                    }
                });
            }

            Effect::AbortReply => {
                if let Some(token) = self.reply_cancel.take() {
                    tracing::debug!(session_id = %self.context.session_id, "Aborting pending reply");
                    token.cancel();
                }
            }

            Effect::ClearTranscript => {
                self.transcript.clear().await?;
                let _ = self.broadcast_tx.send(UiEvent::TranscriptCleared);
            }

            Effect::NotifyReplyDone => {
                self.reply_cancel = None;
                let _ = self.broadcast_tx.send(UiEvent::ReplyDone);
            }
        }

        Ok(())
    }
}
