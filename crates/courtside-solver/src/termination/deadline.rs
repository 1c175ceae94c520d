//! Wall-clock deadline termination.

use std::time::{Duration, Instant};

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once an absolute instant has passed.
///
/// Unlike [`TimeTermination`](super::TimeTermination) the deadline is shared
/// by every solve of a run, so a multi-lineup run stops as a whole.
#[derive(Debug, Clone)]
pub struct DeadlineTermination {
    deadline: Instant,
}

impl DeadlineTermination {
    pub fn at(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }
}

impl Termination for DeadlineTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        Instant::now() >= self.deadline
    }
}
