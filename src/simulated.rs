//! Seeded simulated oracle for a known hidden phase.
//!
//! Uses the standard interference likelihood of iterative phase estimation:
//!
//! ```text
//!   P(One  | φ; offset, scale) = sin²(scale · (φ − offset) / 2)
//!   P(Zero | φ; offset, scale) = cos²(scale · (φ − offset) / 2)
//! ```
//!
//! This is what the estimator is designed against, so it is the natural
//! stand-in for a real experiment in tests, demos and benchmarks.
//!
//! Notes:
//! - The oracle is **seedable**; the same seed replays the same outcomes.
//! - It never fails (`Error = Infallible`).

use std::convert::Infallible;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::{Outcome, PhaseOracle};

/// Simulated binary-outcome oracle for a fixed hidden `phase`.
#[derive(Debug, Clone)]
pub struct SimulatedOracle {
    phase: f64,
    rng: StdRng,
    calls: u64,
}

impl SimulatedOracle {
    /// Oracle for `phase` with a fixed seed (reproducible).
    pub fn new(phase: f64, seed: u64) -> Self {
        Self {
            phase,
            rng: StdRng::seed_from_u64(seed),
            calls: 0,
        }
    }

    /// The hidden phase.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Number of draws so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Probability of `One` at `(offset, scale)`.
    ///
    /// Non-finite arguments give `0.5` (no information).
    pub fn probability_one(&self, offset: f64, scale: f64) -> f64 {
        let half = 0.5 * scale * (self.phase - offset);
        let s = half.sin();
        let p = s * s;
        if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

impl PhaseOracle for SimulatedOracle {
    type Error = Infallible;

    fn sample(&mut self, offset: f64, scale: f64) -> Result<Outcome, Infallible> {
        let p_one = self.probability_one(offset, scale);
        self.calls = self.calls.saturating_add(1);
        let u: f64 = self.rng.random();
        Ok(if u < p_one { Outcome::One } else { Outcome::Zero })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn probability_matches_the_likelihood() {
        let o = SimulatedOracle::new(0.7, 0);
        assert_eq!(o.phase(), 0.7);
        // At the phase itself the probe is certain to answer Zero.
        assert!(o.probability_one(0.7, 3.0).abs() < 1e-15);
        // Half a period away it is certain to answer One.
        assert!((o.probability_one(0.7 - PI, 1.0) - 1.0).abs() < 1e-12);
        // A quarter period away both outcomes are equally likely.
        assert!((o.probability_one(0.7 - PI / 2.0, 1.0) - 0.5).abs() < 1e-12);
        assert_eq!(o.probability_one(f64::NAN, 1.0), 0.5);
    }

    #[test]
    fn same_seed_same_outcomes() {
        let mut a = SimulatedOracle::new(1.2, 9);
        let mut b = SimulatedOracle::new(1.2, 9);
        for i in 0..200 {
            let offset = (i as f64) * 0.01;
            assert_eq!(a.sample(offset, 2.0), b.sample(offset, 2.0));
        }
        assert_eq!(a.calls(), 200);
    }

    #[test]
    fn empirical_rate_tracks_probability() {
        let mut o = SimulatedOracle::new(0.0, 1234);
        let (offset, scale) = (-PI / 3.0, 1.0);
        let p = o.probability_one(offset, scale);
        let n = 20_000;
        let ones = (0..n)
            .filter(|_| o.sample(offset, scale) == Ok(Outcome::One))
            .count();
        let rate = ones as f64 / n as f64;
        assert!((rate - p).abs() < 0.02, "rate={rate} p={p}");
    }
}
