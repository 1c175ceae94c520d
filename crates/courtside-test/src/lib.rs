//! Shared test fixtures for Courtside crates.
//!
//! This crate provides player pools, rosters and a brute-force reference
//! optimizer for testing. It does NOT depend on `courtside-solver`, so the
//! solver's own tests can use it.
//!
//! - [`fixtures`] - Small hand-built pools and a full NBA slate
//! - [`random`] - Seeded random pools
//! - [`oracle`] - Exhaustive enumeration of every lineup
//! - [`assertions`] - Lineup validity checks
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! courtside-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use courtside_test::fixtures::{scenario_pool, two_guard_roster};
//! use courtside_test::oracle::{brute_force_best, OracleRules};
//! ```

pub mod assertions;
pub mod fixtures;
pub mod oracle;
pub mod random;

pub use assertions::assert_valid_lineup;
pub use fixtures::{nba_slate, scenario_pool, two_guard_roster, two_lineup_pool};
pub use oracle::{brute_force_best, OracleLineup, OracleRules};
pub use random::random_pool;
