//! Statistics collected during a traversal

use crate::matcher::MatchRule;
use serde::Serialize;
use std::time::Duration;

/// Counters for one search run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Nodes yielded by the walker
    pub nodes_visited: usize,
    /// Nodes of the configured text type
    pub text_nodes: usize,
    /// Deepest node seen (root = 0)
    pub max_depth: usize,
    /// Matches through the name rule
    pub name_matches: usize,
    /// Matches through the characters rule
    pub text_matches: usize,
    /// Traversal wall time in milliseconds
    pub processing_time_ms: u64,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one visited node
    pub fn record_node(&mut self, depth: usize, is_text: bool) {
        self.nodes_visited += 1;
        self.max_depth = self.max_depth.max(depth);
        if is_text {
            self.text_nodes += 1;
        }
    }

    pub fn record_match(&mut self, rule: MatchRule) {
        match rule {
            MatchRule::Name => self.name_matches += 1,
            MatchRule::Characters => self.text_matches += 1,
        }
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.processing_time_ms = elapsed.as_millis() as u64;
    }

    pub fn total_matches(&self) -> usize {
        self.name_matches + self.text_matches
    }

    /// Human-readable summary, one item per line
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             Nodes visited: {}\n\
             Text nodes: {}\n\
             Max depth: {}\n\
             Matches: {} (name: {}, text: {})\n\
             Processing time: {}ms",
            self.nodes_visited,
            self.text_nodes,
            self.max_depth,
            self.total_matches(),
            self.name_matches,
            self.text_matches,
            self.processing_time_ms
        )
    }
}
