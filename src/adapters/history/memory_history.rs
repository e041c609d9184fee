//! Implements HistoryPort in process memory.
//!
//! Keeps the newest `HISTORY_CAP` turns per identifier plus running counters.
//! Nothing is persisted; a restart starts empty.

use crate::domain::{ConversationStats, ConversationTurn};
use crate::ports::HistoryPort;
use crate::ports::outbound::HISTORY_CAP;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct HistoryData {
    turns: HashMap<String, VecDeque<ConversationTurn>>,
    stats: ConversationStats,
}

pub struct InMemoryHistory {
    cap: usize,
    cache: RwLock<HistoryData>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_cap(HISTORY_CAP)
    }

    /// Custom per-identifier cap (minimum 1).
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            cache: RwLock::new(HistoryData::default()),
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HistoryPort for InMemoryHistory {
    async fn record(&self, turn: ConversationTurn) {
        let mut data = self.cache.write().await;

        data.stats.total_messages += 1;
        if let Some(category) = turn.category {
            *data.stats.by_category.entry(category).or_insert(0) += 1;
        }
        *data.stats.by_source.entry(turn.source).or_insert(0) += 1;

        let identifier = turn.identifier.clone();
        let queue = data.turns.entry(identifier.clone()).or_default();
        queue.push_back(turn);
        while queue.len() > self.cap {
            queue.pop_front();
        }
        let kept = queue.len();
        data.stats.unique_identifiers = data.turns.len();

        debug!(identifier = %identifier, kept, "conversation turn recorded");
    }

    async fn recent(&self, identifier: &str) -> Vec<ConversationTurn> {
        let data = self.cache.read().await;
        data.turns
            .get(identifier)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn stats(&self) -> ConversationStats {
        self.cache.read().await.stats.clone()
    }
}
