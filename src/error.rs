//! Error types.
//!
//! Only configuration problems are errors of this crate. Running out of
//! measurement budget is a normal termination (see [`crate::Termination`]),
//! and oracle failures are passed through untouched as the oracle's own
//! error type.

use thiserror::Error;

/// A [`crate::WalkConfig`] or [`crate::Belief`] that cannot seed an estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The initial mean is NaN or infinite.
    #[error("initial mean must be finite, got {0}")]
    NonFiniteMean(f64),

    /// The initial standard deviation is NaN, infinite, zero or negative.
    #[error("initial standard deviation must be finite and > 0, got {0}")]
    InvalidStdDev(f64),

    /// `n_measurements` is zero.
    #[error("n_measurements must be at least 1")]
    ZeroMeasurements,

    /// `max_measurements` is zero.
    #[error("max_measurements must be at least 1")]
    ZeroBudget,

    /// `unwind_depth` is zero.
    #[error("unwind_depth must be at least 1")]
    ZeroUnwindDepth,
}

/// Error from the one-shot [`crate::estimate`] helper.
///
/// `E` is the oracle's error type; it is carried as-is.
#[derive(Debug, Error)]
pub enum EstimateError<E> {
    /// The arguments were rejected before any oracle call.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The oracle failed; the run stopped at that call.
    #[error("oracle failed: {0}")]
    Oracle(E),
}
