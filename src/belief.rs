//! Belief state and the closed-form random-walk update.
//!
//! The belief is a Gaussian summary `(mean, std_dev)` of what is known about
//! the phase. Each accepted outcome moves the mean by a fixed fraction of the
//! current width and shrinks the width by a constant factor:
//!
//! ```text
//!   Zero:  mean' = mean - std_dev * e^(-1/2)
//!   One:   mean' = mean + std_dev * e^(-1/2)
//!          std_dev' = std_dev * sqrt(1 - 1/e)
//! ```
//!
//! Both steps are invertible, which is what makes bounded rollback cheap:
//! [`Belief::reverted`] undoes [`Belief::updated`] exactly (up to rounding).

use std::f64::consts::PI;

use crate::{ConfigError, Outcome};

/// Width decay applied per accepted update: `sqrt(1 - 1/e)`.
pub const PREFACTOR: f64 = 0.795_060_097_620_650_1;

/// Mean step, in units of the current width: `e^(-1/2)`.
pub const INV_SQRT_E: f64 = 0.606_530_659_712_633_4;

/// Current `(mean, std_dev)` summary of the phase.
///
/// `Belief` is `Copy`; the update rules return new values instead of
/// mutating, so a run is a sequence of snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Belief {
    /// Point estimate of the phase.
    pub mean: f64,
    /// Uncertainty of the estimate (always finite and `> 0`).
    pub std_dev: f64,
}

impl Belief {
    /// Create a belief, rejecting a non-finite mean or a width that is not
    /// finite and positive.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ConfigError> {
        if !mean.is_finite() {
            return Err(ConfigError::NonFiniteMean(mean));
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(ConfigError::InvalidStdDev(std_dev));
        }
        Ok(Self { mean, std_dev })
    }

    /// Oracle parameters for the next update sample: `(offset, scale)`.
    ///
    /// The offset sits a quarter period below the mean so that, at the
    /// current width, both outcomes are equally likely when the belief is
    /// right.
    pub fn sampling_point(&self) -> (f64, f64) {
        (self.mean - PI * self.std_dev / 2.0, 1.0 / self.std_dev)
    }

    /// Oracle parameters for a consistency probe: `(mean, 1 / std_dev)`.
    ///
    /// A consistent belief makes `Zero` the likely outcome here.
    pub fn validation_point(&self) -> (f64, f64) {
        (self.mean, 1.0 / self.std_dev)
    }

    /// Belief after accepting `outcome`.
    #[must_use]
    pub fn updated(self, outcome: Outcome) -> Self {
        let step = self.std_dev * INV_SQRT_E;
        let mean = match outcome {
            Outcome::Zero => self.mean - step,
            Outcome::One => self.mean + step,
        };
        Self {
            mean,
            std_dev: self.std_dev * PREFACTOR,
        }
    }

    /// Inverse of [`Belief::updated`] for the same `outcome`.
    #[must_use]
    pub fn reverted(self, outcome: Outcome) -> Self {
        let std_dev = self.std_dev / PREFACTOR;
        let step = std_dev * INV_SQRT_E;
        let mean = match outcome {
            Outcome::Zero => self.mean + step,
            Outcome::One => self.mean - step,
        };
        Self { mean, std_dev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constants_match_their_closed_forms() {
        assert!((PREFACTOR - (1.0 - (-1.0f64).exp()).sqrt()).abs() < 1e-15);
        assert!((INV_SQRT_E - (-0.5f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn new_rejects_bad_inputs() {
        assert!(matches!(Belief::new(f64::NAN, 1.0), Err(ConfigError::NonFiniteMean(_))));
        assert!(matches!(Belief::new(0.0, 0.0), Err(ConfigError::InvalidStdDev(_))));
        assert!(matches!(Belief::new(0.0, -1.0), Err(ConfigError::InvalidStdDev(_))));
        assert!(matches!(
            Belief::new(0.0, f64::INFINITY),
            Err(ConfigError::InvalidStdDev(_))
        ));
        assert!(Belief::new(1.5, 0.25).is_ok());
    }

    #[test]
    fn zero_moves_down_one_moves_up() {
        let b = Belief::new(0.0, 1.0).unwrap();
        let z = b.updated(Outcome::Zero);
        let o = b.updated(Outcome::One);
        assert_eq!(z.mean, -INV_SQRT_E);
        assert_eq!(o.mean, INV_SQRT_E);
        assert_eq!(z.std_dev, PREFACTOR);
        assert_eq!(o.std_dev, PREFACTOR);
    }

    #[test]
    fn sampling_point_is_quarter_period_below_mean() {
        let b = Belief::new(1.0, 0.5).unwrap();
        let (offset, scale) = b.sampling_point();
        assert!((offset - (1.0 - PI * 0.25)).abs() < 1e-15);
        assert_eq!(scale, 2.0);
        assert_eq!(b.validation_point(), (1.0, 2.0));
    }

    proptest! {
        #[test]
        fn revert_undoes_update(
            mean in -100.0f64..100.0,
            std_dev in 1e-6f64..100.0,
            one in any::<bool>(),
        ) {
            let b = Belief { mean, std_dev };
            let o = if one { Outcome::One } else { Outcome::Zero };
            let back = b.updated(o).reverted(o);
            let tol = 1e-9 * (1.0 + mean.abs() + std_dev);
            prop_assert!((back.mean - mean).abs() <= tol, "mean {} -> {}", mean, back.mean);
            prop_assert!((back.std_dev - std_dev).abs() <= 1e-12 * std_dev.max(1.0));
        }

        #[test]
        fn width_shrinks_on_every_update(
            std_dev in 1e-6f64..100.0,
            outcomes in proptest::collection::vec(any::<bool>(), 1..40),
        ) {
            let mut b = Belief { mean: 0.0, std_dev };
            for one in outcomes {
                let prev = b.std_dev;
                b = b.updated(if one { Outcome::One } else { Outcome::Zero });
                prop_assert!(b.std_dev < prev);
                prop_assert!(b.std_dev > 0.0);
            }
        }
    }
}
