//! Sizing helpers: predicted width, acceptance targets, budget guidance.

use crate::PREFACTOR;

/// Width of the belief after `accepted` updates with no rollbacks.
///
/// `initial_std_dev · PREFACTOR^accepted`.
///
/// From a unit prior this leaves the normal `f64` range after about 3 090
/// updates, at which point `1 / std_dev` is no longer finite.
///
/// # Example
///
/// ```rust
/// use phasewalk::{predicted_std_dev, PREFACTOR};
///
/// assert_eq!(predicted_std_dev(1.0, 0), 1.0);
/// assert!((predicted_std_dev(2.0, 2) - 2.0 * PREFACTOR * PREFACTOR).abs() < 1e-15);
/// ```
pub fn predicted_std_dev(initial_std_dev: f64, accepted: usize) -> f64 {
    let exp = i32::try_from(accepted).unwrap_or(i32::MAX);
    initial_std_dev * PREFACTOR.powi(exp)
}

/// Smallest number of accepted updates that brings the width from
/// `initial_std_dev` down to `target_std_dev` or below.
///
/// Returns `0` if the prior is already narrow enough. Non-finite or
/// non-positive inputs give `0` as well: there is nothing meaningful to aim for.
///
/// # Example
///
/// ```rust
/// use phasewalk::{accepted_for_precision, predicted_std_dev};
///
/// let n = accepted_for_precision(1.0, 1e-3);
/// assert!(predicted_std_dev(1.0, n) <= 1e-3);
/// assert!(predicted_std_dev(1.0, n - 1) > 1e-3);
/// ```
pub fn accepted_for_precision(initial_std_dev: f64, target_std_dev: f64) -> usize {
    let ok = |x: f64| x.is_finite() && x > 0.0;
    if !(ok(initial_std_dev) && ok(target_std_dev)) || target_std_dev >= initial_std_dev {
        return 0;
    }
    // ln(target / initial) / ln(PREFACTOR), then fix up rounding at the edge.
    let raw = (target_std_dev / initial_std_dev).ln() / PREFACTOR.ln();
    let mut n = raw.ceil().max(0.0) as usize;
    while n > 0 && predicted_std_dev(initial_std_dev, n - 1) <= target_std_dev {
        n -= 1;
    }
    while predicted_std_dev(initial_std_dev, n) > target_std_dev {
        n += 1;
    }
    n
}

/// Suggest a `max_measurements` for an acceptance target.
///
/// A run with no rollbacks spends exactly `2 · n_measurements` calls (one
/// update draw plus one validation per accepted update). `headroom` is the
/// extra fraction reserved for rollbacks and re-validation, clamped to
/// `[0, 10]`; non-finite values fall back to `0.5`.
///
/// # Example
///
/// ```rust
/// use phasewalk::suggested_max_measurements;
///
/// assert_eq!(suggested_max_measurements(50, 0.0), 100);
/// assert_eq!(suggested_max_measurements(50, 0.5), 150);
/// ```
pub fn suggested_max_measurements(n_measurements: usize, headroom: f64) -> usize {
    let headroom = if headroom.is_finite() {
        headroom.clamp(0.0, 10.0)
    } else {
        0.5 // conservative fallback
    };
    let base = n_measurements.saturating_mul(2);
    let extra = (base as f64 * headroom).ceil() as usize;
    base.saturating_add(extra).max(1)
}
