//! Error types for the simulation kernels.
//!
//! This module defines the structured error taxonomy shared by both
//! pipelines:
//!
//! - `InvalidArgument`: non-positive counts, out-of-range parameters
//! - `NumericAnomaly`: a non-finite or non-positive generated price
//! - `Io`: the path file could not be opened or written
//! - `Malformed`: a path file could not be parsed back
//! - `Entropy`: the OS entropy source is unavailable at start-up
//!
//! Only [`SimError::Io`] is recoverable mid-run; every other variant aborts
//! the pipeline that raised it.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout `sim_engine`.
pub type SimResult<T> = Result<T, SimError>;

/// Simulation error.
///
/// # Examples
/// ```
/// use sim_engine::SimError;
///
/// let err = SimError::invalid("path_count", "must be at least 1, got 0");
/// assert!(err.to_string().contains("path_count"));
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid argument detected before any allocation or sampling.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// A generated price was NaN, infinite or non-positive.
    #[error("Numeric anomaly on path {path} at step {step}: price = {value}")]
    NumericAnomaly {
        /// Zero-based path index.
        path: usize,
        /// Step index within the path (0 is the initial price).
        step: usize,
        /// The offending value.
        value: f64,
    },

    /// The destination could not be opened or written.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A persisted path file did not match the expected layout.
    #[error("Malformed path file at record {record}: {reason}")]
    Malformed {
        /// One-based record (line) number.
        record: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The OS entropy source could not seed a generator.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),
}

impl SimError {
    /// Shorthand for [`SimError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the run may continue after this error.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
