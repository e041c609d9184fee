//! Provider gateway. One remote attempt, then the local fallback.
//!
//! Flow per call:
//! 1. Empty input -> greeting prompt, no remote call
//! 2. No provider -> response selector
//! 3. One request to the provider with the persona prompt, bounded by `timeout`
//! 4. Any failure (error, timeout, blank payload) -> log, response selector
//! 5. Success -> trimmed payload
//!
//! No retries. Callers always receive a string.

use crate::domain::{Category, DomainError, GREETING_PROMPT, Reply, ReplySource};
use crate::ports::ProviderPort;
use crate::shared::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TIMEOUT_SECS};
use crate::usecases::response_selector::ResponseSelector;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Persona instruction sent as the system prompt.
pub const PERSONA_PROMPT: &str = "You are Jesus Christ, speaking with compassion, wisdom, and love. \
Answer in the spirit of the teachings found in the Bible, quoting scripture (Book Chapter:Verse) when it helps. \
Be kind and understanding, and offer guidance grounded in Christian values. \
Keep replies short: three to five sentences.";

/// Emotional hint appended to the persona prompt for some sentiment categories.
fn emotion_hint(category: Category) -> Option<&'static str> {
    match category {
        Category::Sadness => Some("The person is feeling sad. Offer comfort and hope."),
        Category::Anxiety => Some("The person is anxious or afraid. Offer peace and reassurance."),
        Category::Anger => Some("The person is angry. Gently guide them toward forgiveness."),
        _ => None,
    }
}

/// System prompt for a message of the given category.
pub fn persona_prompt(category: Category) -> Cow<'static, str> {
    match emotion_hint(category) {
        Some(hint) => Cow::Owned(format!("{}\n\n{}", PERSONA_PROMPT, hint)),
        None => Cow::Borrowed(PERSONA_PROMPT),
    }
}

/// First `max` chars of `text`, for log fields.
pub(crate) fn preview(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}

pub struct ProviderGateway {
    provider: Option<Arc<dyn ProviderPort>>,
    selector: Arc<ResponseSelector>,
    timeout: Duration,
    max_output_len: u32,
}

impl ProviderGateway {
    /// `provider = None` is pure fallback mode.
    pub fn new(provider: Option<Arc<dyn ProviderPort>>, selector: Arc<ResponseSelector>) -> Self {
        Self {
            provider,
            selector,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output_len: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_len(mut self, max_output_len: u32) -> Self {
        self.max_output_len = max_output_len;
        self
    }

    /// "openai", "anthropic", "mock", or "fallback" when no provider is configured.
    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().map_or("fallback", |p| p.name())
    }

    pub fn selector(&self) -> &Arc<ResponseSelector> {
        &self.selector
    }

    pub fn max_output_len(&self) -> u32 {
        self.max_output_len
    }

    /// Reply text for `text`. Never fails.
    pub async fn generate(&self, text: &str, max_output_len: u32) -> String {
        self.generate_with_len(text, max_output_len).await.text
    }

    /// `generate` with the configured output length, keeping category and source.
    pub async fn generate_reply(&self, text: &str) -> Reply {
        self.generate_with_len(text, self.max_output_len).await
    }

    async fn generate_with_len(&self, text: &str, max_output_len: u32) -> Reply {
        if text.trim().is_empty() {
            return Reply {
                text: GREETING_PROMPT.to_string(),
                category: None,
                source: ReplySource::Greeting,
            };
        }

        let Some(provider) = self.provider.as_ref() else {
            return self.selector.respond_reply(text);
        };

        let category = self.selector.classify(text);
        let system = persona_prompt(category);
        let call = provider.complete(&system, text, max_output_len);

        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(raw)) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err(DomainError::Provider("empty reply".to_string()))
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DomainError::ProviderTimeout {
                millis: self.timeout.as_millis(),
            }),
        };

        match outcome {
            Ok(reply) => {
                info!(
                    provider = provider.name(),
                    category = %category,
                    reply_len = reply.len(),
                    "provider reply received"
                );
                Reply {
                    text: reply,
                    category: Some(category),
                    source: ReplySource::Provider,
                }
            }
            Err(error) => {
                warn!(
                    provider = provider.name(),
                    error = %error,
                    text = %preview(text, 50),
                    "provider failed; using local fallback"
                );
                self.selector.respond_reply(text)
            }
        }
    }
}
