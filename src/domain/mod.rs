//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the keyword classifier and the static reply material live here.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod rules;

pub use catalog::{ReplyCatalog, ResponseTable, ScriptureTable, GREETING_PROMPT};
pub use entities::{
    Category, ConversationStats, ConversationTurn, HealthReport, PrayerReceipt, PrayerRequest,
    Reply, ReplySource, Verse,
};
pub use errors::DomainError;
pub use rules::{classify, ClassificationRule, RuleSet};
