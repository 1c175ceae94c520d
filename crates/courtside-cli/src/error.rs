use courtside::{ConfigError, IngestError, OptimizerError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Optimizer(#[from] OptimizerError),
}

pub type Result<T> = std::result::Result<T, CliError>;
