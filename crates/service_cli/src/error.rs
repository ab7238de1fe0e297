//! CLI error types

use sim_engine::SimError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `mcsim` binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimError),

    #[error("{0} pipeline(s) failed; see the log for details")]
    PipelineFailed(usize),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
