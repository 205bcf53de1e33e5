//! Error types for time-zone inference
//!
//! Error policy: fail fast and propagate. The engine never substitutes a
//! default offset and never lets NaN escape a normalization step.

use thiserror::Error;

/// Errors raised by the inference engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// No timestamps were supplied
    #[error("Empty input: at least one transaction timestamp is required")]
    EmptyInput,

    /// Histogram total is zero, so it cannot be normalized
    #[error("Insufficient data: activity histogram has a total count of zero")]
    InsufficientData,

    /// Histogram counts (or a scaled copy) exceed the `u64` range
    #[error("Count overflow: histogram counts exceed the representable total")]
    CountOverflow,

    /// Raw likelihoods summed to zero (or a non-finite value)
    #[error("Degenerate distribution: likelihood sum is {sum}")]
    DegenerateDistribution { sum: f64 },

    /// Candidate offset outside [-12, 12]
    #[error("Invalid UTC offset: {0} (must be in [-12, 12])")]
    InvalidOffset(i32),

    /// Unix timestamp outside the representable range
    #[error("Invalid Unix timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Result type for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;
