// src/crawl/state.rs
// =============================================================================
// Shared aggregation state for a single crawl invocation.
//
// Two collections are shared by every task in the tree:
// - the visited set: which URLs have been claimed by some task
// - the word counts: running totals across all fetched pages
//
// Both are DashMap-backed (sharded locks), so tasks never take an outer lock
// around them. The only ways to mutate are try_claim() and merge().
// =============================================================================

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashSet<String>,
    counts: DashMap<String, usize>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the URL was already claimed by some task.
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Atomically inserts `url` if absent.
    ///
    /// Returns true only for the single caller that actually inserted it;
    /// that caller owns the URL and is the only one allowed to fetch it.
    pub fn try_claim(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Adds `delta` to the count for `word`, inserting it at zero first if
    /// needed. The entry guard holds the shard lock for the whole
    /// read-modify-write.
    pub fn merge(&self, word: &str, delta: usize) {
        *self.counts.entry(word.to_string()).or_insert(0) += delta;
    }

    /// Number of successful claims so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_counts(&self) -> bool {
        !self.counts.is_empty()
    }

    /// Copies the current counts out. Only meaningful once every task has
    /// finished.
    pub fn snapshot_counts(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
