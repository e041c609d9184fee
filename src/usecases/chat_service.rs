//! Chat service. Orchestrates one conversational turn end to end.
//!
//! Sanitises input, asks the provider gateway for a reply, and records the
//! exchange in the history port. Also serves scripture lookup, prayer
//! submissions, and the health snapshot.

use crate::domain::catalog::PRAYER_ACK;
use crate::domain::{
    Category, ConversationStats, ConversationTurn, DomainError, HealthReport, PrayerReceipt,
    PrayerRequest, Reply, Verse,
};
use crate::ports::HistoryPort;
use crate::shared::config::DEFAULT_MAX_MESSAGE_LENGTH;
use crate::usecases::provider_gateway::{ProviderGateway, preview};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const PRAYER_MIN_CHARS: usize = 10;
const PRAYER_MAX_CHARS: usize = 5000;
const PRAYER_NAME_MAX_CHARS: usize = 100;

/// Trim and cut to at most `max_len` characters (not bytes).
pub fn sanitize_input(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_len {
        trimmed.to_string()
    } else {
        trimmed.chars().take(max_len).collect::<String>().trim_end().to_string()
    }
}

pub struct ChatService {
    gateway: Arc<ProviderGateway>,
    history: Arc<dyn HistoryPort>,
    max_message_length: usize,
}

impl ChatService {
    pub fn new(gateway: Arc<ProviderGateway>, history: Arc<dyn HistoryPort>) -> Self {
        Self {
            gateway,
            history,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }

    pub fn with_max_message_length(mut self, max_message_length: usize) -> Self {
        self.max_message_length = max_message_length.max(1);
        self
    }

    /// One turn for caller `identifier`. Never fails.
    pub async fn chat(&self, identifier: &str, text: &str) -> Reply {
        let text = sanitize_input(text, self.max_message_length);
        info!(identifier, text = %preview(&text, 50), "message received");

        let reply = self.gateway.generate_reply(&text).await;

        info!(
            identifier,
            source = %reply.source,
            category = ?reply.category,
            reply = %preview(&reply.text, 50),
            "reply sent"
        );
        self.history
            .record(ConversationTurn::new(identifier, text, &reply))
            .await;
        reply
    }

    /// Random verse for a topic category (love, forgiveness, faith, guidance, strength, peace, hope).
    pub fn verse(&self, category: Category) -> Option<Verse> {
        self.gateway.selector().verse(category)
    }

    pub async fn history(&self, identifier: &str) -> Vec<ConversationTurn> {
        self.history.recent(identifier).await
    }

    pub async fn stats(&self) -> ConversationStats {
        self.history.stats().await
    }

    /// Validate a prayer, generate a reply for it, and issue a receipt.
    ///
    /// # Errors
    /// `DomainError::Validation` when the text is outside 10..=5000 chars or the name exceeds 100.
    pub async fn submit_prayer(&self, request: PrayerRequest) -> Result<PrayerReceipt, DomainError> {
        let text = request.prayer_text.trim();
        let len = text.chars().count();
        if !(PRAYER_MIN_CHARS..=PRAYER_MAX_CHARS).contains(&len) {
            return Err(DomainError::Validation(format!(
                "prayer must be {}-{} characters, got {}",
                PRAYER_MIN_CHARS, PRAYER_MAX_CHARS, len
            )));
        }
        if let Some(name) = &request.name {
            if name.chars().count() > PRAYER_NAME_MAX_CHARS {
                return Err(DomainError::Validation(format!(
                    "name must be at most {} characters",
                    PRAYER_NAME_MAX_CHARS
                )));
            }
        }

        let prayer_id = uuid::Uuid::new_v4().to_string();
        let reply = self.gateway.generate_reply(text).await;
        let identifier = match (&request.name, request.is_anonymous) {
            (Some(name), false) => format!("prayer:{}", name.trim()),
            _ => "prayer:anonymous".to_string(),
        };
        self.history
            .record(ConversationTurn::new(identifier, text, &reply))
            .await;

        info!(prayer_id = %prayer_id, anonymous = request.is_anonymous, "prayer submitted");
        Ok(PrayerReceipt {
            prayer_id,
            message: PRAYER_ACK.to_string(),
            reply: reply.text,
        })
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            provider: self.gateway.provider_name().to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::history::InMemoryHistory;
    use crate::adapters::provider::MockProvider;
    use crate::domain::{GREETING_PROMPT, ReplyCatalog, ReplySource};
    use crate::usecases::ResponseSelector;

    fn service(provider: Option<Arc<MockProvider>>) -> ChatService {
        let selector = Arc::new(ResponseSelector::with_seed(
            Arc::new(ReplyCatalog::standard()),
            3,
        ));
        let provider = provider.map(|p| p as Arc<dyn crate::ports::ProviderPort>);
        let gateway = Arc::new(ProviderGateway::new(provider, selector));
        ChatService::new(gateway, Arc::new(InMemoryHistory::new()))
    }

    #[test]
    fn test_sanitize_trims_and_truncates_chars() {
        assert_eq!(sanitize_input("  hello  ", 100), "hello");
        assert_eq!(sanitize_input("abcdef", 3), "abc");
        assert_eq!(sanitize_input("ñññññ", 2), "ññ");
        assert_eq!(sanitize_input("   ", 10), "");
    }

    #[tokio::test]
    async fn test_chat_records_history_and_stats() {
        let svc = service(None);
        let first = svc.chat("+15551234567", "Hello").await;
        assert_eq!(first.category, Some(Category::Greeting));
        let second = svc.chat("+15551234567", "   ").await;
        assert_eq!(second.text, GREETING_PROMPT);

        let turns = svc.history("+15551234567").await;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "Hello");
        assert_eq!(turns[1].source, ReplySource::Greeting);

        let stats = svc.stats().await;
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.by_category.get(&Category::Greeting), Some(&1));
    }

    #[tokio::test]
    async fn test_chat_truncates_before_generation() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let svc = service(Some(mock.clone())).with_max_message_length(5);
        svc.chat("web", "  hello world  ").await;
        let (_, user, _) = mock.last_request().unwrap();
        assert_eq!(user, "hello");
    }

    #[tokio::test]
    async fn test_chat_survives_provider_failure() {
        let svc = service(Some(Arc::new(MockProvider::failing("timeout"))));
        let reply = svc.chat("web", "I need strength").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(!reply.text.is_empty());
    }

    #[tokio::test]
    async fn test_prayer_validation() {
        let svc = service(None);
        let too_short = PrayerRequest {
            prayer_text: "help".into(),
            name: None,
            is_anonymous: true,
        };
        assert!(matches!(
            svc.submit_prayer(too_short).await,
            Err(DomainError::Validation(_))
        ));

        let long_name = PrayerRequest {
            prayer_text: "Please heal my mother".into(),
            name: Some("x".repeat(101)),
            is_anonymous: false,
        };
        assert!(svc.submit_prayer(long_name).await.is_err());
    }

    #[tokio::test]
    async fn test_prayer_receipt() {
        let svc = service(Some(Arc::new(MockProvider::replying("I hear you, Sarah."))));
        let receipt = svc
            .submit_prayer(PrayerRequest {
                prayer_text: "I lost my grandmother and my heart is broken.".into(),
                name: Some("Sarah".into()),
                is_anonymous: false,
            })
            .await
            .unwrap();
        assert_eq!(receipt.prayer_id.len(), 36);
        assert_eq!(receipt.message, PRAYER_ACK);
        assert_eq!(receipt.reply, "I hear you, Sarah.");
        assert_eq!(svc.history("prayer:Sarah").await.len(), 1);
    }

    #[tokio::test]
    async fn test_verse_and_health() {
        let svc = service(None);
        assert!(svc.verse(Category::Hope).is_some());
        assert!(svc.verse(Category::Neutral).is_none());
        let health = svc.health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.provider, "fallback");
    }
}
