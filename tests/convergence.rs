//! End-to-end convergence against the simulated oracle.
//!
//! These use a few hundred trials to keep CI fast; thresholds are loose
//! relative to what the estimator typically achieves at these settings.

#![cfg(feature = "stochastic")]

use phasewalk::{
    run_trials, suggested_max_measurements, RandomWalk, SimulatedOracle, Termination,
    WalkConfig,
};

fn walk(n: usize, max: usize, depth: usize) -> RandomWalk {
    RandomWalk::new(
        WalkConfig::default()
            .n_measurements(n)
            .max_measurements(max)
            .unwind_depth(depth),
    )
    .unwrap()
}

#[test]
fn most_runs_land_close_to_the_phase() {
    let w = walk(50, 300, 1);
    let phase = 0.3;
    let close = (0..100u64)
        .filter(|&seed| {
            let mut oracle = SimulatedOracle::new(phase, seed);
            let mean = match w.estimate(&mut oracle) {
                Ok(m) => m,
                Err(never) => match never {},
            };
            (mean - phase).abs() < 0.01
        })
        .count();
    assert!(close >= 85, "only {close}/100 runs within 0.01");
}

#[test]
fn same_seed_same_estimate() {
    let w = walk(30, 120, 2);
    let mut a = SimulatedOracle::new(-0.7, 42);
    let mut b = SimulatedOracle::new(-0.7, 42);
    let ea = w.run(&mut a).unwrap();
    let eb = w.run(&mut b).unwrap();
    assert_eq!(ea, eb);
    assert_eq!(a.calls(), ea.total_samples as u64);
}

#[test]
fn trial_summary_reflects_accuracy_and_budget() {
    let n = 50;
    let w = walk(n, suggested_max_measurements(n, 2.0), 1);
    let s = run_trials(&w, 0.3, 200, 1);
    assert_eq!(s.trials, 200);
    assert!(s.median_abs_error < 1e-3, "median_abs_error={}", s.median_abs_error);
    assert!(s.target_rate > 0.9, "target_rate={}", s.target_rate);
    assert!(s.mean_samples >= 2.0 * n as f64 - 1e-9);
    assert!(s.mean_samples <= w.config().max_measurements as f64);
}

#[test]
fn deeper_unwind_still_converges() {
    let w = walk(40, 200, 2);
    let s = run_trials(&w, 0.5, 200, 99);
    assert!(s.median_abs_error < 1e-2, "median_abs_error={}", s.median_abs_error);
}

#[test]
fn tight_budget_returns_best_effort() {
    let w = walk(60, 100, 1);
    let mut oracle = SimulatedOracle::new(0.3, 5);
    let est = w.run(&mut oracle).unwrap();
    assert_eq!(est.termination, Termination::BudgetExhausted);
    assert_eq!(est.total_samples, 100);
    assert!((est.mean() - 0.3).abs() < 0.5);
}
