//! JSON chat adapter. Decodes `ChatRequest`, encodes `ChatResponse`.

use crate::domain::{Category, DomainError, Reply, ReplySource};
use crate::usecases::ChatService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAX_REQUEST_CHARS: usize = 2000;

/// Identifier used when the request carries no `user_id`.
const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ChatRequest {
    /// Text must be 1..=2000 characters after trimming.
    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.text.trim().chars().count();
        if len == 0 {
            return Err(DomainError::Validation("text must not be empty".into()));
        }
        if len > MAX_REQUEST_CHARS {
            return Err(DomainError::Validation(format!(
                "text must be at most {} characters, got {}",
                MAX_REQUEST_CHARS, len
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub category: Option<Category>,
    pub source: ReplySource,
    pub timestamp: DateTime<Utc>,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            response: reply.text,
            category: reply.category,
            source: reply.source,
            timestamp: Utc::now(),
        }
    }
}

/// Decode a JSON body, run one chat turn, encode the response.
///
/// # Errors
/// `DomainError::Validation` for malformed JSON or out-of-range text;
/// `DomainError::Transport` if the response cannot be serialised.
pub async fn handle_chat_json(chat: &ChatService, body: &str) -> Result<String, DomainError> {
    let request: ChatRequest = serde_json::from_str(body)
        .map_err(|e| DomainError::Validation(format!("malformed chat request: {}", e)))?;
    request.validate()?;

    let identifier = request.user_id.as_deref().unwrap_or(ANONYMOUS_USER);
    let reply = chat.chat(identifier, &request.text).await;
    serde_json::to_string(&ChatResponse::from(reply))
        .map_err(|e| DomainError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::history::InMemoryHistory;
    use crate::adapters::provider::MockProvider;
    use crate::domain::ReplyCatalog;
    use crate::usecases::{ProviderGateway, ResponseSelector};
    use std::sync::Arc;

    fn chat_service() -> ChatService {
        let selector = Arc::new(ResponseSelector::with_seed(
            Arc::new(ReplyCatalog::standard()),
            1,
        ));
        let provider = Arc::new(MockProvider::replying("Seek and you shall find."));
        ChatService::new(
            Arc::new(ProviderGateway::new(Some(provider), selector)),
            Arc::new(InMemoryHistory::new()),
        )
    }

    #[test]
    fn test_validate_bounds() {
        let ok = ChatRequest {
            text: "I need guidance today".into(),
            user_id: None,
        };
        assert!(ok.validate().is_ok());
        let empty = ChatRequest {
            text: "  ".into(),
            user_id: None,
        };
        assert!(empty.validate().is_err());
        let long = ChatRequest {
            text: "a".repeat(2001),
            user_id: None,
        };
        assert!(long.validate().is_err());
    }

    #[tokio::test]
    async fn test_handle_chat_json() {
        let svc = chat_service();
        let out = handle_chat_json(&svc, r#"{"text": "I need guidance", "user_id": "user_123"}"#)
            .await
            .unwrap();
        let resp: ChatResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(resp.response, "Seek and you shall find.");
        assert_eq!(resp.category, Some(Category::Guidance));
        assert_eq!(resp.source, ReplySource::Provider);
        assert_eq!(svc.history("user_123").await.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_chat_json_rejects_garbage() {
        let svc = chat_service();
        let err = handle_chat_json(&svc, "{not json").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
