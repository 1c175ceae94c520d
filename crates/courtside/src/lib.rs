//! Courtside - NBA daily fantasy lineup optimizer in Rust
//!
//! Load a player pool, describe the contest and call [`optimize`].
//!
//! # Example
//!
//! ```rust
//! use courtside::prelude::*;
//!
//! let pool = PlayerPool::try_from_records(vec![
//!     PlayerRecord::new("A", "Alpha", "BOS", &["PG"], 8_000, 50.0),
//!     PlayerRecord::new("B", "Bravo", "NYK", &["SG"], 7_000, 45.0),
//!     PlayerRecord::new("C", "Charlie", "MIA", &["PG", "SG"], 4_000, 20.0),
//! ])
//! .unwrap();
//!
//! let config = OptimizerConfig::new()
//!     .with_salary_cap(15_000)
//!     .with_slots(vec![SlotConfig::new("PG", &["PG"]), SlotConfig::new("SG", &["SG"])]);
//!
//! let set = courtside::optimize(&pool, &config).unwrap();
//! let best = set.best().unwrap();
//! assert_eq!(best.player_ids(), vec!["A", "B"]);
//! assert_eq!(best.total_salary(), 15_000);
//! ```

// Domain types
pub use courtside_core::{
    Category, GenerationStatus, InfeasibleModelError, Lineup, LineupScore, LineupSet, Player,
    PlayerPool, PlayerRecord, RosterSlot, RosterSpec, SlotAssignment, ValidationError,
};

// Configuration
pub use courtside_config::{
    ConfigError, ContestConfig, GenerationConfig, OptimizerConfig, RulesConfig, SlotConfig,
    TerminationConfig,
};

// Engine
pub use courtside_solver::{
    BranchAndBound, ConstraintModel, LineupSetGenerator, ModelRules, OptimizerError,
    SearchStats, SolveOutcome,
};

// CSV import/export
pub use courtside_ingest::{
    read_pool, read_pool_from_path, write_lineups, write_lineups_to_path, IngestError,
    IngestReport,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{optimize, optimize_with_stats};

pub mod prelude {
    pub use super::{
        Category, GenerationStatus, Lineup, LineupSet, Player, PlayerPool, PlayerRecord,
        RosterSlot, RosterSpec,
    };
    pub use super::{OptimizerConfig, SlotConfig, TerminationConfig};
    pub use super::{LineupSetGenerator, ModelRules, OptimizerError};
}
