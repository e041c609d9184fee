//! Mock provider for testing without API calls.
//!
//! Returns a scripted reply or a scripted failure, optionally after a delay.
//! Records every request so tests can inspect what the gateway sent.

use crate::domain::DomainError;
use crate::ports::ProviderPort;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(String),
}

/// (system prompt, user text, max output length)
pub type RecordedRequest = (String, String, u32);

pub struct MockProvider {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockProvider {
    /// Always succeeds with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::from_script(Script::Reply(reply.into()))
    }

    /// Always fails with a provider error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::from_script(Script::Fail(reason.into()))
    }

    fn from_script(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Simulated network latency before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `complete` calls started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl ProviderPort for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        max_output_len: u32,
    ) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some((
            system_prompt.to_string(),
            user_text.to_string(),
            max_output_len,
        ));
        info!(text_len = user_text.len(), "[MOCK] Simulating provider call");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Fail(reason) => Err(DomainError::Provider(reason.clone())),
        }
    }
}
