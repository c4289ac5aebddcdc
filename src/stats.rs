//! Statistics collection for agent searches
//!
//! Collaborators report these after each `search` call, e.g. the rollout
//! count per generated move.

use std::time::Duration;

/// Statistics of the most recent search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStatistics {
    /// Number of rollouts performed
    pub rollouts: usize,

    /// Live nodes in the tree after the search, root included
    pub node_count: usize,

    /// Wall time spent searching
    pub elapsed: Duration,

    /// Deepest node reached during selection
    pub max_depth: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            rollouts: 0,
            node_count: 1,
            elapsed: Duration::ZERO,
            max_depth: 0,
        }
    }

    /// `(rollout_count, node_count, elapsed_time)`
    pub fn as_tuple(&self) -> (usize, usize, Duration) {
        (self.rollouts, self.node_count, self.elapsed)
    }

    /// Returns the number of rollouts per second
    pub fn rollouts_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.rollouts as f64 / self.elapsed.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             - Rollouts: {}\n\
             - Elapsed: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Rollouts per second: {:.1}",
            self.rollouts,
            self.elapsed.as_secs_f64(),
            self.node_count,
            self.max_depth,
            self.rollouts_per_second()
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
