//! Application use cases. Orchestrate domain logic via ports.

pub mod chat_service;
pub mod provider_gateway;
pub mod response_selector;

pub use chat_service::{ChatService, sanitize_input};
pub use provider_gateway::{PERSONA_PROMPT, ProviderGateway};
pub use response_selector::ResponseSelector;
