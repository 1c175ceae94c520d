//! Courtside Core - Domain types for lineup optimization
//!
//! This crate provides the fundamental abstractions for Courtside:
//! - Players, categories and the validated player pool
//! - Roster slot definitions
//! - Lineups, lineup sets and their ordering score
//! - Validation and structural infeasibility errors

pub mod error;
pub mod lineup;
pub mod player;
pub mod pool;
pub mod roster;
pub mod score;

pub use error::{InfeasibleModelError, ValidationError};
pub use lineup::{GenerationStatus, Lineup, LineupSet, SlotAssignment};
pub use player::{Category, Player, PlayerRecord};
pub use pool::{PlayerPool, RejectedRecord};
pub use roster::{RosterSlot, RosterSpec};
pub use score::{to_milli_points, LineupScore, MAX_PROJECTION, POINTS_SCALE};
