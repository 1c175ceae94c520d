//! Error types for Courtside

use thiserror::Error;

/// A malformed player record, roster definition or rule set.
///
/// Recoverable by the caller correcting the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Player identifier is empty or whitespace
    #[error("player identifier must not be empty")]
    EmptyIdentifier,

    /// Salary is zero or negative
    #[error("player `{id}` has non-positive salary {salary}")]
    NonPositiveSalary { id: String, salary: i64 },

    /// Salary does not fit the salary column type
    #[error("player `{id}` has salary {salary} out of range")]
    SalaryOutOfRange { id: String, salary: i64 },

    /// Player lists no eligible categories
    #[error("player `{id}` has no eligible positions")]
    NoCategories { id: String },

    /// Projection is negative, NaN, infinite or above `MAX_PROJECTION`
    #[error("player `{id}` has invalid projection {points}")]
    InvalidProjection { id: String, points: f64 },

    /// Two records share an identifier
    #[error("duplicate player identifier `{id}`")]
    DuplicateIdentifier { id: String },

    /// The pool contains no players
    #[error("player pool is empty")]
    EmptyPool,

    /// Roster has no slots
    #[error("roster must define at least one slot")]
    EmptyRoster,

    /// Roster slot accepts no categories
    #[error("roster slot `{label}` accepts no positions")]
    EmptySlot { label: String },

    /// A rule refers to a player that is not in the pool
    #[error("{rule} references unknown player `{id}`")]
    UnknownPlayer { rule: &'static str, id: String },

    /// A player is both locked and excluded
    #[error("player `{id}` is both locked and excluded")]
    LockedAndExcluded { id: String },

    /// Invalid rule or run parameter
    #[error("invalid rule: {0}")]
    InvalidRule(String),
}

/// A structural impossibility detected before the solver runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfeasibleModelError {
    /// Not enough distinct eligible players to fill every slot
    #[error("slot `{slot}` cannot be filled: only {eligible} eligible players for {required} slots needing them")]
    UnfillableSlot {
        slot: String,
        eligible: usize,
        required: usize,
    },

    /// Locked players outnumber the slots
    #[error("{locked} players are locked but the roster has only {slots} slots")]
    TooManyLocked { locked: usize, slots: usize },

    /// Locked players cannot be placed together
    #[error("locked player `{id}` cannot be placed alongside the other locked players")]
    UnplaceableLocked { id: String },

    /// Locked salaries alone exceed the cap
    #[error("locked players cost {salary}, above the salary cap of {cap}")]
    LockedOverCap { salary: u64, cap: u64 },

    /// Locked players of a single team exceed the team limit
    #[error("{count} locked players from team `{team}` exceed the limit of {max}")]
    LockedOverTeamLimit {
        team: String,
        count: usize,
        max: usize,
    },
}

/// Result type alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
