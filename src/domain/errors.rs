//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. The reply path itself never
//! returns one: provider failures end in the local fallback.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider call exceeded its time budget.
    #[error("Provider timed out after {millis} ms")]
    ProviderTimeout { millis: u128 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Transport encoding failed: {0}")]
    Transport(String),

    #[error("Terminal UI error: {0}")]
    Ui(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
