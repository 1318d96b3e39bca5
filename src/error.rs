//! Error types for mvfrontier.

use chrono::NaiveDate;
use thiserror::Error;

/// Error type for frontier estimation.
///
/// Only failures that invalidate the whole run live here. A single target
/// return that turns out infeasible is reported through
/// [`PointOutcome`](crate::frontier::PointOutcome) instead.
#[derive(Debug, Error)]
pub enum FrontierError {
    /// Not enough observations to estimate statistics.
    #[error("Insufficient data: {available} return observations, at least {required} required")]
    InsufficientData { available: usize, required: usize },

    /// Shape mismatch between inputs.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Input that cannot be fed to the estimator or the optimizer.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A zero or near-zero price produced an undefined return.
    #[error("Non-finite return for {asset} in period {period}")]
    NonFiniteReturn { asset: String, period: NaiveDate },

    /// Asset selection outside of the supported vocabulary or size.
    #[error("Invalid asset selection: {0}")]
    InvalidSelection(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Solver could not be set up.
    #[error("Solver error: {0}")]
    SolverError(String),
}

/// Result type for mvfrontier operations.
pub type Result<T> = std::result::Result<T, FrontierError>;
