//! Provider adapters. Implement ProviderPort for remote text generation.
//!
//! OpenAI-compatible and Anthropic adapters, plus a mock for tests.

pub mod anthropic_adapter;
pub mod mock_adapter;
pub mod openai_adapter;

pub use anthropic_adapter::AnthropicAdapter;
pub use mock_adapter::MockProvider;
pub use openai_adapter::OpenAiAdapter;

use crate::domain::DomainError;
use crate::ports::ProviderPort;
use crate::shared::config::{AppConfig, ProviderKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured provider. `Ok(None)` means pure fallback mode.
pub fn from_config(cfg: &AppConfig) -> Result<Option<Arc<dyn ProviderPort>>, DomainError> {
    let timeout = cfg.timeout_or_default();
    match cfg.provider_kind() {
        Some(ProviderKind::OpenAi) => {
            info!(
                model = %cfg.openai_model_or_default(),
                url = %cfg.openai_api_url_or_default(),
                "using OpenAI as text provider"
            );
            Ok(Some(Arc::new(OpenAiAdapter::new(
                cfg.openai_api_url_or_default(),
                cfg.openai_api_key().unwrap_or_default(),
                cfg.openai_model_or_default(),
                timeout,
            )?)))
        }
        Some(ProviderKind::Anthropic) => {
            info!(
                model = %cfg.anthropic_model_or_default(),
                url = %cfg.anthropic_api_url_or_default(),
                "using Anthropic as text provider"
            );
            Ok(Some(Arc::new(AnthropicAdapter::new(
                cfg.anthropic_api_url_or_default(),
                cfg.anthropic_api_key().unwrap_or_default(),
                cfg.anthropic_model_or_default(),
                timeout,
            )?)))
        }
        None => {
            warn!("no provider key set (OPENAI_API_KEY / ANTHROPIC_API_KEY); using local replies only");
            Ok(None)
        }
    }
}
