//! The sampling seam: anything that turns `(offset, scale)` into one binary outcome.
//!
//! The estimator never looks inside an oracle. It calls [`PhaseOracle::sample`]
//! strictly one call at a time, each call spending one unit of the measurement
//! budget, and passes any error straight back to its caller.

use std::convert::Infallible;

use crate::Outcome;

/// A probabilistic binary-outcome sampler parameterised by an offset and a scale.
///
/// For a hidden phase `φ`, the usual model is
/// `P(One) = sin²(scale · (φ − offset) / 2)`, but the estimator only relies on
/// `Zero` being likely at `(mean, 1/std_dev)` when the belief is right.
///
/// Closures `FnMut(f64, f64) -> Result<Outcome, E>` implement this trait
/// directly; wrap an infallible closure with [`from_fn`].
///
/// # Example
///
/// ```rust
/// use phasewalk::{PhaseOracle, Outcome};
///
/// let mut calls = 0u32;
/// let mut oracle = |_offset: f64, _scale: f64| -> Result<Outcome, std::io::Error> {
///     calls += 1;
///     Ok(Outcome::Zero)
/// };
/// assert_eq!(oracle.sample(0.0, 1.0).unwrap(), Outcome::Zero);
/// ```
pub trait PhaseOracle {
    /// Failure type of a single draw.
    type Error;

    /// Draw one outcome at `(offset, scale)`.
    fn sample(&mut self, offset: f64, scale: f64) -> Result<Outcome, Self::Error>;
}

impl<F, E> PhaseOracle for F
where
    F: FnMut(f64, f64) -> Result<Outcome, E>,
{
    type Error = E;

    fn sample(&mut self, offset: f64, scale: f64) -> Result<Outcome, E> {
        self(offset, scale)
    }
}

/// Adapter for an oracle that cannot fail.
#[derive(Debug, Clone)]
pub struct FnOracle<F> {
    f: F,
}

/// Wrap an infallible `FnMut(offset, scale) -> Outcome` as a [`PhaseOracle`].
pub fn from_fn<F>(f: F) -> FnOracle<F>
where
    F: FnMut(f64, f64) -> Outcome,
{
    FnOracle { f }
}

impl<F> PhaseOracle for FnOracle<F>
where
    F: FnMut(f64, f64) -> Outcome,
{
    type Error = Infallible;

    fn sample(&mut self, offset: f64, scale: f64) -> Result<Outcome, Infallible> {
        Ok((self.f)(offset, scale))
    }
}

/// Wrapper that counts how many times the inner oracle was asked.
///
/// Failed draws are counted too: they were still attempted.
#[derive(Debug, Clone)]
pub struct CountingOracle<O> {
    inner: O,
    calls: u64,
}

impl<O> CountingOracle<O> {
    /// Wrap `inner` with a zeroed counter.
    pub fn new(inner: O) -> Self {
        Self { inner, calls: 0 }
    }

    /// Number of `sample` calls so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Reset the counter without touching the inner oracle.
    pub fn reset(&mut self) {
        self.calls = 0;
    }

    /// Borrow the wrapped oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Drop the counter and return the wrapped oracle.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: PhaseOracle> PhaseOracle for CountingOracle<O> {
    type Error = O::Error;

    fn sample(&mut self, offset: f64, scale: f64) -> Result<Outcome, O::Error> {
        self.calls = self.calls.saturating_add(1);
        self.inner.sample(offset, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallible_closure_errors_pass_through() {
        let mut o = |offset: f64, _scale: f64| -> Result<Outcome, String> {
            if offset < 0.0 {
                Err(format!("negative offset {offset}"))
            } else {
                Ok(Outcome::One)
            }
        };
        assert_eq!(o.sample(1.0, 1.0), Ok(Outcome::One));
        assert_eq!(o.sample(-1.0, 1.0), Err("negative offset -1".to_string()));
    }

    #[test]
    fn from_fn_sees_the_arguments() {
        let mut seen = Vec::new();
        {
            let mut o = from_fn(|offset, scale| {
                seen.push((offset, scale));
                Outcome::Zero
            });
            let _ = o.sample(0.5, 2.0);
            let _ = o.sample(-0.5, 4.0);
        }
        assert_eq!(seen, vec![(0.5, 2.0), (-0.5, 4.0)]);
    }

    #[test]
    fn counting_oracle_counts_failures_too() {
        let mut n = 0;
        let inner = move |_: f64, _: f64| -> Result<Outcome, ()> {
            n += 1;
            if n % 2 == 0 {
                Err(())
            } else {
                Ok(Outcome::Zero)
            }
        };
        let mut c = CountingOracle::new(inner);
        for _ in 0..5 {
            let _ = c.sample(0.0, 1.0);
        }
        assert_eq!(c.calls(), 5);
        c.reset();
        assert_eq!(c.calls(), 0);
    }

    #[test]
    fn counting_oracle_hands_back_the_inner_oracle() {
        let mut c = CountingOracle::new(CountingOracle::new(from_fn(|_, _| Outcome::One)));
        for _ in 0..3 {
            let _ = c.sample(0.0, 1.0);
        }
        assert_eq!(c.inner().calls(), 3);
        let mut inner = c.into_inner();
        assert_eq!(inner.sample(0.0, 1.0), Ok(Outcome::One));
        assert_eq!(inner.calls(), 4);
    }
}
