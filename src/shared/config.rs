//! Application configuration. Provider credentials, limits, logging.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";

/// Upper bound on generated tokens per reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 150;

/// Provider request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Inbound messages are truncated to this many characters.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 1000;

/// Which remote provider is active. Picked by key presence, OpenAI first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // OpenAI
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from TTJ_OPENAI_API_KEY, falling back to OPENAI_API_KEY.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Chat completions endpoint. Read from TTJ_OPENAI_API_URL.
    #[serde(default)]
    pub openai_api_url: Option<String>,

    /// Read from TTJ_OPENAI_MODEL, falling back to OPENAI_MODEL.
    #[serde(default)]
    pub openai_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Anthropic
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from TTJ_ANTHROPIC_API_KEY, falling back to ANTHROPIC_API_KEY.
    #[serde(default)]
    pub anthropic_api_key: Option<String>,

    /// Messages endpoint. Read from TTJ_ANTHROPIC_API_URL.
    #[serde(default)]
    pub anthropic_api_url: Option<String>,

    /// Read from TTJ_ANTHROPIC_MODEL, falling back to ANTHROPIC_MODEL.
    #[serde(default)]
    pub anthropic_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Limits
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from TTJ_MAX_OUTPUT_TOKENS.
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// Read from TTJ_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Read from TTJ_MAX_MESSAGE_LENGTH, falling back to MAX_MESSAGE_LENGTH.
    #[serde(default)]
    pub max_message_length: Option<usize>,

    /// Fixed RNG seed for the local reply tables (reproducible demos). Read from TTJ_REPLY_SEED.
    #[serde(default)]
    pub reply_seed: Option<u64>,

    /// tracing filter used when RUST_LOG is unset. Read from TTJ_LOG_LEVEL, falling back to LOG_LEVEL.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TTJ").try_parsing(true));
        if let Ok(path) = std::env::var("TTJ_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // MAX_MESSAGE_LENGTH is read unprefixed too so existing .env files keep working
        if cfg.max_message_length.is_none() {
            if let Ok(s) = std::env::var("MAX_MESSAGE_LENGTH") {
                if let Ok(n) = s.parse::<usize>() {
                    cfg.max_message_length = Some(n);
                }
            }
        }
        Ok(cfg)
    }

    /// Active provider, if any key is present. OpenAI wins when both are set.
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        if self.openai_api_key().is_some() {
            Some(ProviderKind::OpenAi)
        } else if self.anthropic_api_key().is_some() {
            Some(ProviderKind::Anthropic)
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OpenAI Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the OpenAI key from config or OPENAI_API_KEY env. Blank keys count as unset.
    pub fn openai_api_key(&self) -> Option<String> {
        non_blank(
            self.openai_api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok()),
        )
    }

    pub fn openai_api_url_or_default(&self) -> String {
        self.openai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string())
    }

    pub fn openai_model_or_default(&self) -> String {
        self.openai_model
            .clone()
            .or_else(|| std::env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Anthropic Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the Anthropic key from config or ANTHROPIC_API_KEY env. Blank keys count as unset.
    pub fn anthropic_api_key(&self) -> Option<String> {
        non_blank(
            self.anthropic_api_key
                .clone()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok()),
        )
    }

    pub fn anthropic_api_url_or_default(&self) -> String {
        self.anthropic_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_URL.to_string())
    }

    pub fn anthropic_model_or_default(&self) -> String {
        self.anthropic_model
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Limits
    // ─────────────────────────────────────────────────────────────────────────

    pub fn max_output_tokens_or_default(&self) -> u32 {
        self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }

    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Zero is treated as unset.
    pub fn max_message_length_or_default(&self) -> usize {
        self.max_message_length
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH)
    }

    /// Filter for the tracing subscriber. Defaults to "info".
    pub fn log_level_or_default(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("LOG_LEVEL").ok())
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "info".to_string())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_key_wins_over_anthropic() {
        let cfg = AppConfig {
            openai_api_key: Some("sk-openai".into()),
            anthropic_api_key: Some("sk-ant".into()),
            ..Default::default()
        };
        assert_eq!(cfg.provider_kind(), Some(ProviderKind::OpenAi));
    }

    #[test]
    fn test_anthropic_selected_when_only_key() {
        let cfg = AppConfig {
            anthropic_api_key: Some("sk-ant".into()),
            openai_api_key: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.provider_kind(), Some(ProviderKind::Anthropic));
    }

    #[test]
    fn test_limit_defaults() {
        let cfg = AppConfig {
            max_message_length: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.max_output_tokens_or_default(), DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(30));
        assert_eq!(cfg.max_message_length_or_default(), DEFAULT_MAX_MESSAGE_LENGTH);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let cfg = AppConfig {
            openai_api_url: Some("http://localhost:11434/v1/chat/completions".into()),
            openai_model: Some("llama3.2".into()),
            timeout_secs: Some(5),
            max_message_length: Some(280),
            ..Default::default()
        };
        assert_eq!(
            cfg.openai_api_url_or_default(),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(cfg.openai_model_or_default(), "llama3.2");
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(5));
        assert_eq!(cfg.max_message_length_or_default(), 280);
    }
}
