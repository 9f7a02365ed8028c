//! Reply generation abstraction
//!
//! The session runtime never knows where replies come from; it talks to a
//! [`ReplyGenerator`]. The production implementation is the simulated
//! [`CannedReplyGenerator`]; a real inference backend replaces it without
//! touching any session invariant.

mod canned;
mod error;

pub use canned::CannedReplyGenerator;
pub use error::{ReplyError, ReplyErrorKind};

use crate::session::Turn;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the bot reply for a conversation
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate the next bot reply given the transcript so far
    async fn generate(&self, history: &[Turn]) -> Result<String, ReplyError>;
}

#[async_trait]
impl<T: ReplyGenerator + ?Sized> ReplyGenerator for Arc<T> {
    async fn generate(&self, history: &[Turn]) -> Result<String, ReplyError> {
        (**self).generate(history).await
    }
}

/// Logging wrapper for reply generators
pub struct LoggingGenerator {
    inner: Arc<dyn ReplyGenerator>,
}

impl LoggingGenerator {
    pub fn new(inner: Arc<dyn ReplyGenerator>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ReplyGenerator for LoggingGenerator {
    async fn generate(&self, history: &[Turn]) -> Result<String, ReplyError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(history).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    history_turns = history.len(),
                    reply_chars = reply.len(),
                    "Reply generated"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e,
                    kind = ?e.kind,
                    "Reply generation failed"
                );
            }
        }

        result
    }
}
