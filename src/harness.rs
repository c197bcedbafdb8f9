//! Repeated-trial harness against [`SimulatedOracle`].
//!
//! Useful for choosing `n_measurements`, `max_measurements` and
//! `unwind_depth` before pointing the estimator at a real (expensive) oracle:
//! run a few hundred simulated trials at a representative phase and look at
//! the error and budget numbers.
//!
//! Trials are independent and deterministic: trial `i` uses an oracle seeded
//! from `(seed, i)`, so the same call always reproduces the same summary.

use crate::{RandomWalk, SimulatedOracle};

/// Aggregate error and budget statistics over independent trials.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    /// Number of trials run.
    pub trials: usize,
    /// Mean of `|estimate − phase|`.
    pub mean_abs_error: f64,
    /// Root mean square of `estimate − phase`.
    pub rms_error: f64,
    /// Median of `|estimate − phase|`.
    pub median_abs_error: f64,
    /// Mean oracle calls per trial.
    pub mean_samples: f64,
    /// Mean rollback passes per trial.
    pub mean_rollbacks: f64,
    /// Fraction of trials that accepted `n_measurements` updates within budget.
    pub target_rate: f64,
}

/// Run `trials` independent estimations of a hidden `phase`.
///
/// `trials == 0` returns an all-zero summary.
///
/// # Example
///
/// ```rust
/// use phasewalk::{run_trials, RandomWalk, WalkConfig};
///
/// let walk = RandomWalk::new(WalkConfig::default())?;
/// let s = run_trials(&walk, 0.3, 20, 7);
/// assert_eq!(s.trials, 20);
/// assert!(s.mean_samples <= 100.0);
/// # Ok::<(), phasewalk::ConfigError>(())
/// ```
pub fn run_trials(walk: &RandomWalk, phase: f64, trials: usize, seed: u64) -> TrialSummary {
    if trials == 0 {
        return TrialSummary::default();
    }

    let mut abs_errors: Vec<f64> = Vec::with_capacity(trials);
    let mut sq_sum = 0.0f64;
    let mut samples = 0usize;
    let mut rollbacks = 0usize;
    let mut reached = 0usize;

    for i in 0..trials {
        let mut oracle = SimulatedOracle::new(phase, trial_seed(seed, i as u64));
        let est = match walk.run(&mut oracle) {
            Ok(est) => est,
            Err(never) => match never {},
        };
        let err = est.mean() - phase;
        abs_errors.push(err.abs());
        sq_sum += err * err;
        samples += est.total_samples;
        rollbacks += est.rollbacks;
        reached += est.reached_target() as usize;
    }

    let n = trials as f64;
    let mean_abs_error = abs_errors.iter().sum::<f64>() / n;
    abs_errors.sort_by(f64::total_cmp);
    let mid = trials / 2;
    let median_abs_error = if trials % 2 == 1 {
        abs_errors[mid]
    } else {
        0.5 * (abs_errors[mid - 1] + abs_errors[mid])
    };

    let summary = TrialSummary {
        trials,
        mean_abs_error,
        rms_error: (sq_sum / n).sqrt(),
        median_abs_error,
        mean_samples: samples as f64 / n,
        mean_rollbacks: rollbacks as f64 / n,
        target_rate: reached as f64 / n,
    };
    tracing::debug!(
        phase,
        trials,
        median_abs_error = summary.median_abs_error,
        target_rate = summary.target_rate,
        "simulated trials finished"
    );
    summary
}

/// Per-trial seed: SplitMix64 over `seed` mixed with the trial index.
fn trial_seed(seed: u64, trial: u64) -> u64 {
    let mut z = seed ^ trial.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalkConfig;

    #[test]
    fn zero_trials_is_empty() {
        let walk = RandomWalk::new(WalkConfig::default()).unwrap();
        assert_eq!(run_trials(&walk, 0.1, 0, 0), TrialSummary::default());
    }

    #[test]
    fn summary_is_deterministic() {
        let walk = RandomWalk::new(WalkConfig::default().n_measurements(20).max_measurements(60))
            .unwrap();
        assert_eq!(run_trials(&walk, -0.4, 25, 3), run_trials(&walk, -0.4, 25, 3));
    }

    #[test]
    fn summary_fields_are_consistent() {
        let cfg = WalkConfig::default().n_measurements(30).max_measurements(80);
        let walk = RandomWalk::new(cfg).unwrap();
        let s = run_trials(&walk, 0.25, 40, 11);
        assert_eq!(s.trials, 40);
        assert!(s.median_abs_error >= 0.0);
        assert!(s.rms_error + 1e-12 >= s.mean_abs_error, "rms below mean abs: {s:?}");
        assert!(s.mean_samples <= cfg.max_measurements as f64);
        assert!((0.0..=1.0).contains(&s.target_rate));
    }

    #[test]
    fn trial_seeds_differ() {
        let a = trial_seed(5, 0);
        let b = trial_seed(5, 1);
        let c = trial_seed(6, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
