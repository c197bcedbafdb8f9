//! Run configuration for [`crate::RandomWalk`].

use crate::{Belief, ConfigError};

/// Full configuration of a random-walk estimation run.
///
/// Start from [`WalkConfig::default()`] and adjust with the builder methods,
/// or set fields directly. Nothing is clamped: [`WalkConfig::validate`]
/// rejects invalid values instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Prior mean of the phase.
    pub initial_mean: f64,
    /// Prior standard deviation (finite, `> 0`).
    pub initial_std_dev: f64,
    /// Number of validated updates to accept before stopping.
    pub n_measurements: usize,
    /// Hard cap on oracle calls, counting update draws, validation probes and
    /// re-validations after a rollback.
    ///
    /// A value below `2 * n_measurements` is allowed; the run then ends on
    /// budget exhaustion. Use [`crate::suggested_max_measurements`] for a
    /// starting point.
    pub max_measurements: usize,
    /// History entries undone per rollback pass.
    pub unwind_depth: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            initial_mean: 0.0,
            initial_std_dev: 1.0,
            n_measurements: 60,
            max_measurements: 100,
            unwind_depth: 1,
        }
    }
}

impl WalkConfig {
    /// Set the prior.
    pub fn with_prior(mut self, mean: f64, std_dev: f64) -> Self {
        self.initial_mean = mean;
        self.initial_std_dev = std_dev;
        self
    }

    /// Set the acceptance target.
    pub fn n_measurements(mut self, n: usize) -> Self {
        self.n_measurements = n;
        self
    }

    /// Set the oracle-call budget.
    pub fn max_measurements(mut self, max: usize) -> Self {
        self.max_measurements = max;
        self
    }

    /// Set the rollback depth.
    pub fn unwind_depth(mut self, depth: usize) -> Self {
        self.unwind_depth = depth;
        self
    }

    /// The prior as a [`Belief`].
    pub fn prior(&self) -> Result<Belief, ConfigError> {
        Belief::new(self.initial_mean, self.initial_std_dev)
    }

    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prior()?;
        if self.n_measurements == 0 {
            return Err(ConfigError::ZeroMeasurements);
        }
        if self.max_measurements == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.unwind_depth == 0 {
            return Err(ConfigError::ZeroUnwindDepth);
        }
        Ok(())
    }
}
