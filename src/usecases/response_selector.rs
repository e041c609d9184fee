//! Response selector: the deterministic local reply path.
//!
//! Classifies text with the catalog's rule set and picks one candidate from the
//! response table using an injected RNG. Used directly when no provider is
//! configured and as the fallback when a provider call fails.

use crate::domain::{Category, ConversationTurn, GREETING_PROMPT, Reply, ReplyCatalog, ReplySource, Verse};
use crate::ports::HistoryPort;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct ResponseSelector {
    catalog: Arc<ReplyCatalog>,
    rng: Mutex<StdRng>,
}

impl ResponseSelector {
    /// Selector seeded from OS entropy.
    pub fn new(catalog: Arc<ReplyCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Selector with a fixed seed. Same seed, same sequence of picks.
    pub fn with_seed(catalog: Arc<ReplyCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(catalog: Arc<ReplyCatalog>, rng: StdRng) -> Self {
        Self {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &ReplyCatalog {
        &self.catalog
    }

    pub fn classify(&self, text: &str) -> Category {
        self.catalog.rules.classify(text)
    }

    /// Reply text for `text`. Never fails.
    pub fn respond(&self, text: &str) -> String {
        self.respond_reply(text).text
    }

    /// Same as `respond`, keeping the category and source.
    pub fn respond_reply(&self, text: &str) -> Reply {
        if text.trim().is_empty() {
            return Reply {
                text: GREETING_PROMPT.to_string(),
                category: None,
                source: ReplySource::Greeting,
            };
        }
        let category = self.classify(text);
        debug!(category = %category, "local reply selected");
        Reply {
            text: self.pick(category),
            category: Some(category),
            source: ReplySource::Fallback,
        }
    }

    /// `respond`, then append the exchange to `history` under `identifier`.
    pub async fn respond_and_record(
        &self,
        identifier: &str,
        text: &str,
        history: &dyn HistoryPort,
    ) -> String {
        let reply = self.respond_reply(text);
        history
            .record(ConversationTurn::new(identifier, text, &reply))
            .await;
        reply.text
    }

    /// One candidate from the response table for `category`.
    pub fn pick(&self, category: Category) -> String {
        let candidates = self.catalog.responses.candidates(category);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        candidates
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| GREETING_PROMPT.to_string())
    }

    /// A random verse for a topic category. None when the category has no scripture.
    pub fn verse(&self, category: Category) -> Option<Verse> {
        let verses = self.catalog.scripture.verses(category);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        verses.choose(&mut *rng).cloned()
    }
}
