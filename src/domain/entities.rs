//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/Twilio/terminal types here; transport adapters map into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Classification label for an inbound message. Exactly one per input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sadness,
    Anxiety,
    Anger,
    Joy,
    Love,
    Forgiveness,
    Faith,
    Guidance,
    Strength,
    Peace,
    Hope,
    Prayer,
    Greeting,
    Neutral,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Sadness,
        Category::Anxiety,
        Category::Anger,
        Category::Joy,
        Category::Love,
        Category::Forgiveness,
        Category::Faith,
        Category::Guidance,
        Category::Strength,
        Category::Peace,
        Category::Hope,
        Category::Prayer,
        Category::Greeting,
        Category::Neutral,
    ];

    /// Topics that carry a scripture list.
    pub const SCRIPTURE_TOPICS: [Category; 7] = [
        Category::Love,
        Category::Forgiveness,
        Category::Faith,
        Category::Guidance,
        Category::Strength,
        Category::Peace,
        Category::Hope,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sadness => "sadness",
            Category::Anxiety => "anxiety",
            Category::Anger => "anger",
            Category::Joy => "joy",
            Category::Love => "love",
            Category::Forgiveness => "forgiveness",
            Category::Faith => "faith",
            Category::Guidance => "guidance",
            Category::Strength => "strength",
            Category::Peace => "peace",
            Category::Hope => "hope",
            Category::Prayer => "prayer",
            Category::Greeting => "greeting",
            Category::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored ("Love", " peace ").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category: {}", s.trim()))
    }
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Remote text-generation provider.
    Provider,
    /// Local response table (no provider, or provider failed).
    Fallback,
    /// Empty input; fixed greeting prompt.
    Greeting,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ReplySource::Provider => "provider",
            ReplySource::Fallback => "fallback",
            ReplySource::Greeting => "greeting",
        })
    }
}

/// A generated reply. `category` is None only on the greeting path (no classification).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub category: Option<Category>,
    pub source: ReplySource,
}

/// One exchange kept in the in-memory history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Caller identifier: phone number, remote address, or terminal session name.
    pub identifier: String,
    pub timestamp: DateTime<Utc>,
    /// Raw (sanitised) inbound text.
    pub text: String,
    pub reply: String,
    pub category: Option<Category>,
    pub source: ReplySource,
}

impl ConversationTurn {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>, reply: &Reply) -> Self {
        Self {
            identifier: identifier.into(),
            timestamp: Utc::now(),
            text: text.into(),
            reply: reply.text.clone(),
            category: reply.category,
            source: reply.source,
        }
    }
}

/// A scripture passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub reference: String,
    pub text: String,
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.reference)
    }
}

/// Aggregate usage counters. Observational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStats {
    pub total_messages: u64,
    pub unique_identifiers: usize,
    pub by_category: BTreeMap<Category, u64>,
    pub by_source: BTreeMap<ReplySource, u64>,
}

/// Prayer submission. Text must be 10..=5000 chars, name at most 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerRequest {
    pub prayer_text: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_anonymous")]
    pub is_anonymous: bool,
}

fn default_anonymous() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerReceipt {
    pub prayer_id: String,
    pub message: String,
    pub reply: String,
}

/// Service health snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// "openai", "anthropic", or "fallback".
    pub provider: String,
    pub timestamp: DateTime<Utc>,
}
