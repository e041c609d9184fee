//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ConversationStats, ConversationTurn, DomainError};

/// Remote text-generation provider (OpenAI, Anthropic, mock).
#[async_trait::async_trait]
pub trait ProviderPort: Send + Sync {
    /// Short provider name for logs and health reports ("openai", "anthropic", "mock").
    fn name(&self) -> &str;

    /// Single completion request. Returns the raw text payload from the response envelope.
    ///
    /// # Errors
    /// `DomainError::Provider` on network failure, non-2xx status, or an unexpected envelope.
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        max_output_len: u32,
    ) -> Result<String, DomainError>;
}

/// Conversation history and usage counters. In-memory; not durable.
#[async_trait::async_trait]
pub trait HistoryPort: Send + Sync {
    /// Append a turn. Implementations keep only the newest `HISTORY_CAP` per identifier.
    async fn record(&self, turn: ConversationTurn);

    /// Turns for `identifier`, oldest first.
    async fn recent(&self, identifier: &str) -> Vec<ConversationTurn>;

    async fn stats(&self) -> ConversationStats;
}

/// Maximum turns kept per identifier.
pub const HISTORY_CAP: usize = 10;
