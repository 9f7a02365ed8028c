//! Trait abstractions for runtime I/O
//!
//! The transcript store seam lets the executor run against the production
//! in-memory store or a test double.

use crate::session::{InMemoryTranscript, Turn};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for the ordered message log of one session
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a turn; returns the turn as stored
    async fn append(&self, turn: Turn) -> Result<Turn, String>;

    /// All turns in append order
    async fn turns(&self) -> Result<Vec<Turn>, String>;

    /// Drop every turn (new chat)
    async fn clear(&self) -> Result<(), String>;
}

#[async_trait]
impl<T: TranscriptStore + ?Sized> TranscriptStore for Arc<T> {
    async fn append(&self, turn: Turn) -> Result<Turn, String> {
        (**self).append(turn).await
    }

    async fn turns(&self) -> Result<Vec<Turn>, String> {
        (**self).turns().await
    }

    async fn clear(&self) -> Result<(), String> {
        (**self).clear().await
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscript {
    async fn append(&self, turn: Turn) -> Result<Turn, String> {
        self.push(turn.clone());
        Ok(turn)
    }

    async fn turns(&self) -> Result<Vec<Turn>, String> {
        Ok(self.snapshot_turns())
    }

    async fn clear(&self) -> Result<(), String> {
        self.clear_all();
        Ok(())
    }
}
