//! Search scope shared with termination conditions.

use std::time::Duration;

use crate::stats::SearchStats;

/// State of a running search that termination conditions may inspect.
#[derive(Debug, Default)]
pub struct SearchScope {
    stats: SearchStats,
    has_incumbent: bool,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of solving.
    pub fn start_solving(&mut self) {
        self.stats.start();
        self.has_incumbent = false;
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    /// Number of search nodes entered so far.
    pub fn nodes_explored(&self) -> u64 {
        self.stats.nodes_explored
    }

    /// True once a complete feasible lineup has been found.
    pub fn has_incumbent(&self) -> bool {
        self.has_incumbent
    }

    pub(crate) fn set_has_incumbent(&mut self) {
        self.has_incumbent = true;
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub(crate) fn into_stats(mut self) -> SearchStats {
        self.stats.finish();
        self.stats
    }
}
