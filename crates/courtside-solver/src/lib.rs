//! Courtside Solver - lineup optimization engine
//!
//! This crate turns a [`PlayerPool`](courtside_core::PlayerPool) and a
//! [`RosterSpec`](courtside_core::RosterSpec) into salary-legal lineups:
//! - [`model`]: the 0/1 constraint model and its structural precheck
//! - [`search`]: exact branch-and-bound over the model
//! - [`termination`]: time, node, deadline and external stop conditions
//! - [`generator`]: repeated solving for sets of distinct lineups
//!
//! # Example
//!
//! ```
//! use courtside_core::{PlayerPool, PlayerRecord, RosterSpec};
//! use courtside_solver::{LineupSetGenerator, ModelRules};
//!
//! let records = (0..10)
//!     .map(|i| {
//!         let pos = ["PG", "SG", "SF", "PF", "C"][i % 5];
//!         PlayerRecord::new(format!("{i}"), format!("P{i}"), "BOS", &[pos], 5_000, 20.0 + i as f64)
//!     })
//!     .collect();
//! let pool = PlayerPool::try_from_records(records).unwrap();
//! let roster = RosterSpec::draftkings_classic();
//!
//! let set = LineupSetGenerator::new(&pool, &roster, ModelRules::new(50_000))
//!     .generate()
//!     .unwrap();
//! assert_eq!(set.best().unwrap().total_salary(), 40_000);
//! ```

pub mod error;
pub mod generator;
pub mod model;
pub mod scope;
pub mod search;
pub mod stats;
pub mod termination;

pub use error::{OptimizerError, Result};
pub use generator::{GeneratorState, LineupSetGenerator};
pub use model::{
    Constraint, ConstraintKind, ConstraintModel, ModelRules, Sense, Variable, Violation,
};
pub use scope::SearchScope;
pub use search::{BranchAndBound, SolveOutcome, SolveResult};
pub use stats::SearchStats;
pub use termination::{
    DeadlineTermination, ExternalTermination, NoTermination, NodeCountTermination,
    OrTermination, StandardTermination, Termination, TimeTermination,
};
