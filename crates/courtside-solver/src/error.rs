//! Error types for the optimizer

use courtside_config::ConfigError;
use courtside_core::{InfeasibleModelError, ValidationError};
use thiserror::Error;

/// Hard failure of an optimization run.
///
/// Solve-time infeasibility is not an error; it is reported through
/// [`SolveOutcome::Infeasible`](crate::search::SolveOutcome::Infeasible) and
/// ends lineup generation gracefully.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Malformed player, roster or rule input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Structural impossibility found before solving
    #[error("Infeasible model: {0}")]
    InfeasibleModel(#[from] InfeasibleModelError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for optimizer operations
pub type Result<T> = std::result::Result<T, OptimizerError>;
