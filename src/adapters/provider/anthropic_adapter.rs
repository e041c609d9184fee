//! Anthropic Messages API adapter.
//!
//! Implements `ProviderPort`; extracts the first text block of `content`.

use crate::domain::DomainError;
use crate::ports::ProviderPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter.
    ///
    /// # Arguments
    /// * `api_url` - Messages endpoint (e.g., "https://api.anthropic.com/v1/messages")
    /// * `api_key` - Sent as `x-api-key`
    /// * `model` - Model id (e.g., "claude-3-sonnet-20240229")
    /// * `timeout` - Whole-request timeout enforced by the HTTP client
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    block_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl ProviderPort for AnthropicAdapter {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        max_output_len: u32,
    ) -> Result<String, DomainError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: max_output_len,
            system: system_prompt,
            messages: [UserMessage {
                role: "user",
                content: user_text,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            warn!(status = %status, "Anthropic API returned error");
            return Err(DomainError::Provider(format!(
                "API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Provider(format!("Failed to parse API response: {}", e)))?;

        // Only the first block counts; a non-text first block is an unexpected envelope.
        let text = parsed
            .content
            .into_iter()
            .next()
            .filter(|b| b.block_type.as_deref().is_none_or(|t| t == "text"))
            .and_then(|b| b.text)
            .ok_or_else(|| DomainError::Provider("No text content returned".to_string()))?;

        debug!(reply_len = text.len(), model = %self.model, "received Anthropic reply");
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> AnthropicAdapter {
        AnthropicAdapter::new(
            format!("{}/v1/messages", server.uri()),
            "ant-test".to_string(),
            "claude-3-sonnet-20240229".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ant-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(serde_json::json!({
                "system": "persona",
                "max_tokens": 64,
                "messages": [{"role": "user", "content": "I feel lost"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "\nI am the way.\n"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = adapter(&server)
            .complete("persona", "I feel lost", 64)
            .await
            .unwrap();
        assert_eq!(reply, "I am the way.");
    }

    #[tokio::test]
    async fn test_rate_limited_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = adapter(&server).complete("p", "hi", 10).await.unwrap_err();
        assert!(matches!(err, DomainError::Provider(ref m) if m.contains("429")));
    }

    #[tokio::test]
    async fn test_missing_text_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]
            })))
            .mount(&server)
            .await;

        assert!(adapter(&server).complete("p", "hi", 10).await.is_err());
    }
}
