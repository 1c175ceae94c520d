//! Ingest error types.

use std::fmt;

use courtside_core::ValidationError;
use thiserror::Error;

/// Failure that prevents reading or writing a file at all.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing column '{column}' (accepted headers: {})", .accepted.join(", "))]
    MissingColumn {
        column: &'static str,
        accepted: &'static [&'static str],
    },
}

/// What was wrong with a rejected row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowProblem {
    #[error("unreadable row: {0}")]
    Malformed(String),

    #[error("empty {column}")]
    MissingField { column: &'static str },

    #[error("{column} '{value}' is not a number")]
    BadNumber { column: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A rejected row and why.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// Line number in the file, counting the header as line 1.
    pub row: usize,
    pub problem: RowProblem,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.problem)
    }
}

impl std::error::Error for RowError {}
