//! The random-walk estimation loop.
//!
//! A run is a small state machine over `Copy` belief snapshots:
//!
//! ```text
//!   Sampling ──update──▶ Validating ──Zero──▶ Sampling
//!                            │
//!                           One
//!                            ▼
//!                       RollingBack ──Zero──▶ Sampling
//!                        │      ▲
//!                        └─One──┘
//! ```
//!
//! Any stage moves to `Done` when the acceptance target is met or the budget
//! is spent. The budget is checked before every oracle call, so a run never
//! spends more than `max_measurements` calls, even in the middle of a
//! rollback.

use crate::oracle::from_fn;
use crate::trace::Recorder;
use crate::{
    Belief, ConfigError, Estimate, EstimateError, History, Outcome, PhaseOracle, Termination,
    Trace, TraceEvent, WalkConfig,
};

/// Upper bound on the history preallocated per run; longer runs grow it.
const HISTORY_PREALLOC: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sampling,
    Validating,
    RollingBack,
    Done(Termination),
}

/// Per-run mutable state. Created fresh for every run and dropped at the end.
struct RunState {
    belief: Belief,
    history: History,
    total: usize,
    accepted: usize,
    rollbacks: usize,
    unwound: usize,
}

/// Random-walk phase estimator with validation and bounded rollback.
///
/// Holds only a validated [`WalkConfig`]; each call to [`RandomWalk::run`]
/// (or one of its wrappers) starts from the prior with an empty history, so a
/// single `RandomWalk` can be reused and shared across threads.
///
/// The width shrinks by [`crate::PREFACTOR`] per accepted update, so after
/// roughly 3 090 accepted updates from a unit prior it drops into the
/// subnormal range and the validation scale `1/std_dev` overflows to
/// infinity. Updates past that point are no longer exactly reversible. Keep
/// `n_measurements` below `accepted_for_precision(initial_std_dev,
/// f64::MIN_POSITIVE)` (see [`crate::accepted_for_precision`]).
///
/// # Example
///
/// ```rust
/// use phasewalk::{Outcome, RandomWalk, WalkConfig};
///
/// let walk = RandomWalk::new(WalkConfig::default().n_measurements(1).max_measurements(2))?;
/// // An oracle that always answers `Zero` walks the mean down by one step.
/// let mean = walk.estimate_with(|_offset, _scale| Outcome::Zero);
/// assert!((mean + 0.606_530_659_712_633_4).abs() < 1e-15);
/// # Ok::<(), phasewalk::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RandomWalk {
    cfg: WalkConfig,
    prior: Belief,
}

impl RandomWalk {
    /// Validate `cfg` and build an estimator.
    pub fn new(cfg: WalkConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let prior = cfg.prior()?;
        Ok(Self { cfg, prior })
    }

    /// The validated configuration.
    pub fn config(&self) -> &WalkConfig {
        &self.cfg
    }

    /// The belief every run starts from.
    pub fn prior(&self) -> Belief {
        self.prior
    }

    /// Run to completion and return the final mean.
    ///
    /// Oracle errors are returned as-is; the run stops at the failing call.
    pub fn estimate<O: PhaseOracle>(&self, oracle: &mut O) -> Result<f64, O::Error> {
        self.run(oracle).map(|e| e.mean())
    }

    /// [`RandomWalk::estimate`] for an oracle that cannot fail.
    pub fn estimate_with<F>(&self, f: F) -> f64
    where
        F: FnMut(f64, f64) -> Outcome,
    {
        match self.estimate(&mut from_fn(f)) {
            Ok(mean) => mean,
            Err(never) => match never {},
        }
    }

    /// Run to completion and return the full report.
    pub fn run<O: PhaseOracle>(&self, oracle: &mut O) -> Result<Estimate, O::Error> {
        self.drive(oracle, &mut ())
    }

    /// Like [`RandomWalk::run`], also returning every step as a [`Trace`].
    ///
    /// If the oracle fails the partial trace is dropped along with the run.
    pub fn run_traced<O: PhaseOracle>(&self, oracle: &mut O) -> Result<(Estimate, Trace), O::Error> {
        let mut trace = Trace::default();
        let est = self.drive(oracle, &mut trace)?;
        Ok((est, trace))
    }

    fn drive<O, R>(&self, oracle: &mut O, rec: &mut R) -> Result<Estimate, O::Error>
    where
        O: PhaseOracle,
        R: Recorder,
    {
        let cfg = &self.cfg;
        let budget = cfg.max_measurements;
        // History never exceeds one entry past the accepted count.
        let prealloc = cfg
            .n_measurements
            .min(budget)
            .min(HISTORY_PREALLOC)
            .saturating_add(1);
        let mut st = RunState {
            belief: self.prior,
            history: History::with_capacity(prealloc),
            total: 0,
            accepted: 0,
            rollbacks: 0,
            unwound: 0,
        };

        let mut stage = Stage::Sampling;
        let termination = loop {
            stage = match stage {
                Stage::Done(t) => break t,
                Stage::Sampling => {
                    if st.accepted >= cfg.n_measurements {
                        Stage::Done(Termination::TargetReached)
                    } else if st.total >= budget {
                        Stage::Done(Termination::BudgetExhausted)
                    } else {
                        let (offset, scale) = st.belief.sampling_point();
                        let outcome = oracle.sample(offset, scale)?;
                        st.total += 1;
                        st.belief = st.belief.updated(outcome);
                        st.history.push(outcome);
                        tracing::trace!(
                            total = st.total,
                            ?outcome,
                            mean = st.belief.mean,
                            std_dev = st.belief.std_dev,
                            "random-walk update"
                        );
                        rec.record(TraceEvent::Update {
                            offset,
                            scale,
                            outcome,
                            belief: st.belief,
                        });
                        Stage::Validating
                    }
                }
                Stage::Validating => {
                    if st.total >= budget {
                        Stage::Done(Termination::BudgetExhausted)
                    } else {
                        Self::probe(&mut st, oracle, rec)?
                    }
                }
                Stage::RollingBack => {
                    let (belief, undone) = st.history.unwind(st.belief, cfg.unwind_depth);
                    st.belief = belief;
                    st.rollbacks += 1;
                    st.unwound += undone;
                    tracing::debug!(
                        undone,
                        remaining = st.history.len(),
                        mean = st.belief.mean,
                        std_dev = st.belief.std_dev,
                        "validation failed, unwound history"
                    );
                    rec.record(TraceEvent::Unwind {
                        undone,
                        belief: st.belief,
                    });
                    if st.total >= budget {
                        Stage::Done(Termination::BudgetExhausted)
                    } else {
                        Self::probe(&mut st, oracle, rec)?
                    }
                }
            };
        };

        tracing::debug!(
            ?termination,
            total = st.total,
            accepted = st.accepted,
            rollbacks = st.rollbacks,
            mean = st.belief.mean,
            std_dev = st.belief.std_dev,
            "random-walk estimation finished"
        );
        rec.record(TraceEvent::Done { termination });

        Ok(Estimate {
            belief: st.belief,
            total_samples: st.total,
            accepted_samples: st.accepted,
            rollbacks: st.rollbacks,
            unwound: st.unwound,
            termination,
        })
    }

    /// Draw a consistency probe at the current belief and pick the next stage.
    ///
    /// The caller has already checked the budget.
    fn probe<O, R>(st: &mut RunState, oracle: &mut O, rec: &mut R) -> Result<Stage, O::Error>
    where
        O: PhaseOracle,
        R: Recorder,
    {
        let (offset, scale) = st.belief.validation_point();
        let outcome = oracle.sample(offset, scale)?;
        st.total += 1;
        tracing::trace!(total = st.total, ?outcome, "consistency probe");
        rec.record(TraceEvent::Validate {
            offset,
            scale,
            outcome,
        });
        Ok(match outcome {
            Outcome::Zero => {
                st.accepted += 1;
                Stage::Sampling
            }
            Outcome::One => Stage::RollingBack,
        })
    }
}

/// One-shot estimation with the arguments spelled out.
///
/// Validates the configuration, runs once, and returns the final mean.
/// Configuration problems and oracle failures come back as the two variants
/// of [`EstimateError`].
pub fn estimate<O: PhaseOracle>(
    oracle: &mut O,
    initial_mean: f64,
    initial_std_dev: f64,
    n_measurements: usize,
    max_measurements: usize,
    unwind_depth: usize,
) -> Result<f64, EstimateError<O::Error>> {
    let walk = RandomWalk::new(WalkConfig {
        initial_mean,
        initial_std_dev,
        n_measurements,
        max_measurements,
        unwind_depth,
    })?;
    walk.estimate(oracle).map_err(EstimateError::Oracle)
}
