//! History adapters. Implement HistoryPort.

pub mod memory_history;

pub use memory_history::InMemoryHistory;
