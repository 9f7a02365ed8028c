//! Simulated reply generation

use super::{ReplyError, ReplyGenerator};
use crate::config::SessionConfig;
use crate::session::Turn;
use async_trait::async_trait;
use std::time::Duration;

/// Generator that returns a fixed reply after a fixed delay
///
/// The reply content is not derived from the user's input; this stands in
/// for a real inference call and always succeeds.
pub struct CannedReplyGenerator {
    text: String,
    delay: Duration,
}

impl CannedReplyGenerator {
    pub fn new(text: impl Into<String>, delay: Duration) -> Self {
        Self {
            text: text.into(),
            delay,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.canned_reply.clone(), config.reply_delay)
    }
}

impl Default for CannedReplyGenerator {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplyGenerator {
    async fn generate(&self, _history: &[Turn]) -> Result<String, ReplyError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.text.clone())
    }
}
