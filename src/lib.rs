//! talk-to-jesus: persona chat backend with Hexagonal Architecture.
//!
//! Keyword classifier and canned replies in the domain; remote LLM providers,
//! in-memory history, transport codecs and the terminal UI as adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
