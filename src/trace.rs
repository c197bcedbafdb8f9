//! Run reports and the optional per-step event log.
//!
//! [`Estimate`] is the compact result of a run: final belief, counters and why
//! the loop stopped. [`Trace`] is an audit log of every oracle call and every
//! rollback pass, useful for debugging a drifting estimate or replaying a run
//! offline.

use crate::{Belief, Outcome};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `n_measurements` validated updates were accepted.
    TargetReached,
    /// `max_measurements` oracle calls were spent first.
    ///
    /// Not a failure: the final mean is still the best available estimate.
    BudgetExhausted,
}

/// Result of one estimation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Final belief; `belief.mean` is the phase estimate.
    pub belief: Belief,
    /// Oracle calls spent (never above `max_measurements`).
    pub total_samples: usize,
    /// Updates that passed validation.
    pub accepted_samples: usize,
    /// Rollback passes performed.
    pub rollbacks: usize,
    /// History entries undone across all rollback passes.
    pub unwound: usize,
    /// Why the loop stopped.
    pub termination: Termination,
}

impl Estimate {
    /// The phase estimate.
    pub fn mean(&self) -> f64 {
        self.belief.mean
    }

    /// Remaining uncertainty.
    pub fn std_dev(&self) -> f64 {
        self.belief.std_dev
    }

    /// Whether the acceptance target was met within budget.
    pub fn reached_target(&self) -> bool {
        self.termination == Termination::TargetReached
    }
}

/// One step of a traced run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceEvent {
    /// An update draw and the belief it produced.
    Update {
        offset: f64,
        scale: f64,
        outcome: Outcome,
        belief: Belief,
    },
    /// A consistency probe at the current mean.
    Validate {
        offset: f64,
        scale: f64,
        outcome: Outcome,
    },
    /// A rollback pass.
    ///
    /// `undone` can be smaller than the configured depth when history ran out.
    Unwind { undone: usize, belief: Belief },
    /// The run stopped.
    Done { termination: Termination },
}

/// Ordered event log of a run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    /// Events in the order they happened.
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Number of logged events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of logged oracle calls (updates plus validations).
    pub fn oracle_calls(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Update { .. } | TraceEvent::Validate { .. }))
            .count()
    }

    /// Mean after each update and each rollback pass, in order.
    pub fn mean_path(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Update { belief, .. } | TraceEvent::Unwind { belief, .. } => {
                    Some(belief.mean)
                }
                _ => None,
            })
            .collect()
    }
}

/// Receives events as the loop produces them.
///
/// The untraced path uses `()`, which discards everything.
pub(crate) trait Recorder {
    fn record(&mut self, event: TraceEvent);
}

impl Recorder for () {
    #[inline]
    fn record(&mut self, _event: TraceEvent) {}
}

impl Recorder for Trace {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
