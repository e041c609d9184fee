//! Infrastructure adapters. Implement outbound ports and drive inbound ones.
//!
//! Remote providers, in-memory history, transport codecs, terminal UI.
//! Map errors to DomainError.

pub mod history;
pub mod provider;
pub mod transport;
pub mod ui;
