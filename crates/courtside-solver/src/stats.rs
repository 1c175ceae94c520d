//! Search statistics.
//!
//! Stack-allocated counters for a single branch-and-bound run.

use std::time::{Duration, Instant};

/// Statistics for one solve.
///
/// # Example
///
/// ```
/// use courtside_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_node();
/// stats.record_node();
/// stats.record_prune();
/// stats.record_incumbent();
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.nodes_pruned, 1);
/// assert_eq!(stats.incumbents_found, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Search nodes entered.
    pub nodes_explored: u64,
    /// Nodes cut by the objective bound.
    pub nodes_pruned: u64,
    /// Candidate placements rejected by constraint propagation.
    pub placements_rejected: u64,
    /// Complete lineups evaluated.
    pub leaves_evaluated: u64,
    /// Times a better lineup replaced the incumbent.
    pub incumbents_found: u64,
}

impl SearchStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.running_time());
    }

    fn running_time(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Returns the elapsed time, frozen once [`finish`](Self::finish) is called.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.running_time())
    }

    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    pub fn record_prune(&mut self) {
        self.nodes_pruned += 1;
    }

    pub fn record_rejection(&mut self) {
        self.placements_rejected += 1;
    }

    pub fn record_leaf(&mut self) {
        self.leaves_evaluated += 1;
    }

    pub fn record_incumbent(&mut self) {
        self.incumbents_found += 1;
    }

    /// Returns the nodes per second rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }

    /// Adds another run's counters to this one.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes_explored += other.nodes_explored;
        self.nodes_pruned += other.nodes_pruned;
        self.placements_rejected += other.placements_rejected;
        self.leaves_evaluated += other.leaves_evaluated;
        self.incumbents_found += other.incumbents_found;
    }
}
