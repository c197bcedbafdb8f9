//! `phasewalk`: random-walk Bayesian phase estimation over a binary oracle.
//!
//! Designed for “estimate a phase you can only probe” problems: there is an
//! unknown real parameter `φ`, and the only access to it is an oracle that,
//! given an offset and a scale you choose, returns one noisy binary outcome
//! whose probability depends sinusoidally on `scale · (φ − offset)`. Each call
//! is expensive (an experiment, a circuit run, a slow simulation), so the
//! estimator works against a hard call budget.
//!
//! The estimator keeps a Gaussian belief `(mean, std_dev)` and repeats:
//!
//! 1. **Sample** at `(mean − π·std_dev/2, 1/std_dev)` and take a closed-form
//!    random-walk step: the mean moves by `±std_dev·e^(-1/2)`, the width
//!    shrinks by `sqrt(1 − 1/e)`.
//! 2. **Validate** with a probe at `(mean, 1/std_dev)`. A consistent belief
//!    answers `Zero`.
//! 3. **Roll back** on `One`: undo up to `unwind_depth` recent steps (exactly,
//!    since each step is invertible) and probe again, until a probe passes.
//!
//! The run ends when `n_measurements` steps have been validated or
//! `max_measurements` oracle calls have been spent, whichever comes first.
//! Running out of budget is not an error; the current mean is returned.
//!
//! **Goals:**
//! - **Budget-exact**: the budget is checked before every oracle call,
//!   including re-validations in the middle of a rollback.
//! - **Transparent errors**: invalid configurations are rejected up front
//!   ([`ConfigError`]); oracle failures come back as the oracle's own error.
//! - **Reproducible**: the loop is deterministic given the oracle's answers;
//!   [`SimulatedOracle`] is seedable.
//!
//! **Entry points:**
//! - [`RandomWalk`]: validated estimator; [`RandomWalk::estimate`],
//!   [`RandomWalk::run`] (full [`Estimate`] report) and
//!   [`RandomWalk::run_traced`] (per-step [`Trace`]).
//! - [`estimate`]: one-shot helper taking the six parameters directly.
//! - [`PhaseOracle`]: the sampling seam, implemented for closures.
//! - (feature `stochastic`) [`SimulatedOracle`] and [`run_trials`] for
//!   offline tuning.
//! - [`predicted_std_dev`] / [`accepted_for_precision`] /
//!   [`suggested_max_measurements`]: sizing guidance.
//!
//! **Non-goals:**
//! - Not an experiment driver: how the oracle produces an outcome (circuits,
//!   hardware, gate sequences) is the caller's business.
//! - No concurrency inside a run; every step depends on the previous outcome.
//!
//! Logging goes through `tracing` (`trace` per oracle call, `debug` per
//! rollback and per finished run); install a subscriber to see it.
//!
//! ```rust
//! use phasewalk::{Outcome, RandomWalk, WalkConfig};
//!
//! let cfg = WalkConfig::default().n_measurements(5).max_measurements(100);
//! let walk = RandomWalk::new(cfg)?;
//! let est = walk.run(&mut phasewalk::from_fn(|_offset, _scale| Outcome::Zero))?;
//! assert_eq!(est.total_samples, 10);
//! assert_eq!(est.accepted_samples, 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

/// One binary oracle outcome.
///
/// At a validation probe, `Zero` means the belief is consistent with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The “0” result.
    Zero,
    /// The “1” result.
    One,
}

impl Outcome {
    /// `true` maps to `One`.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Outcome::One
        } else {
            Outcome::Zero
        }
    }

    /// `One` maps to `true`.
    pub fn is_one(self) -> bool {
        self == Outcome::One
    }
}

mod error;
pub use error::*;

mod belief;
pub use belief::*;

mod history;
pub use history::*;

mod config;
pub use config::*;

mod oracle;
pub use oracle::*;

mod trace;
pub use trace::{Estimate, Termination, Trace, TraceEvent};

mod estimator;
pub use estimator::*;

mod utils;
pub use utils::*;

#[cfg(feature = "stochastic")]
mod simulated;
#[cfg(feature = "stochastic")]
pub use simulated::*;

#[cfg(feature = "stochastic")]
mod harness;
#[cfg(feature = "stochastic")]
pub use harness::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_bit_round_trip() {
        assert_eq!(Outcome::from_bit(true), Outcome::One);
        assert_eq!(Outcome::from_bit(false), Outcome::Zero);
        assert!(Outcome::One.is_one());
        assert!(!Outcome::Zero.is_one());
    }
}
