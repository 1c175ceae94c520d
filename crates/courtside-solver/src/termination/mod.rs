//! Termination conditions for a search.
//!
//! With no termination the search runs until it proves optimality. A search
//! cut short by any condition returns its incumbent flagged as not certified
//! optimal.

mod composite;
mod deadline;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use courtside_config::TerminationConfig;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use deadline::DeadlineTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// Marker type indicating no termination.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        false
    }
}

impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        match self {
            Some(t) => t.is_terminated(scope),
            None => false,
        }
    }
}

/// The termination used by the lineup generator: any configured limit.
pub type StandardTermination = OrTermination<(
    Option<TimeTermination>,
    Option<NodeCountTermination>,
    Option<ExternalTermination>,
    Option<DeadlineTermination>,
)>;

impl StandardTermination {
    /// Builds the limits from configuration; unset limits never fire.
    pub fn from_config(config: Option<&TerminationConfig>) -> Self {
        let time = config
            .and_then(TerminationConfig::time_limit)
            .map(TimeTermination::new);
        let nodes = config
            .and_then(|c| c.node_limit)
            .map(NodeCountTermination::new);
        OrTermination((time, nodes, None, None))
    }

    /// Adds a cancellation flag.
    pub fn with_external(mut self, external: ExternalTermination) -> Self {
        (self.0).2 = Some(external);
        self
    }

    /// Adds an absolute deadline.
    pub fn with_deadline(mut self, deadline: DeadlineTermination) -> Self {
        (self.0).3 = Some(deadline);
        self
    }
}

impl Default for StandardTermination {
    fn default() -> Self {
        OrTermination((None, None, None, None))
    }
}

#[cfg(test)]
mod tests;
