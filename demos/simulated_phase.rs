//! Simulated phase estimation, end to end.
//!
//! 1. Size the run: how many accepted updates for a target precision, and how
//!    much budget to leave for rollbacks.
//! 2. Estimate a hidden phase once, with a per-step trace.
//! 3. Run a batch of seeded trials to see the error distribution.
//!
//! Run with:
//!   RUST_LOG=phasewalk=debug cargo run --example simulated_phase

use phasewalk::{
    accepted_for_precision, run_trials, suggested_max_measurements, RandomWalk,
    SimulatedOracle, TraceEvent, WalkConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hidden_phase = 0.4242;

    // -----------------------------------------------------------------
    // 1. Sizing.
    // -----------------------------------------------------------------
    let n = accepted_for_precision(1.0, 1e-4);
    let max = suggested_max_measurements(n, 1.0);
    println!("target width 1e-4 -> n_measurements={n}, max_measurements={max}");

    let cfg = WalkConfig::default()
        .with_prior(0.0, 1.0)
        .n_measurements(n)
        .max_measurements(max)
        .unwind_depth(1);
    let walk = RandomWalk::new(cfg)?;

    // -----------------------------------------------------------------
    // 2. One traced run.
    // -----------------------------------------------------------------
    let mut oracle = SimulatedOracle::new(hidden_phase, 2024);
    let (est, trace) = walk.run_traced(&mut oracle)?;
    println!(
        "estimate={:.6} (true {hidden_phase}) std_dev={:.2e} calls={} accepted={} rollbacks={} [{:?}]",
        est.mean(),
        est.std_dev(),
        est.total_samples,
        est.accepted_samples,
        est.rollbacks,
        est.termination,
    );
    for e in &trace.events {
        if let TraceEvent::Unwind { undone, belief } = e {
            println!(
                "  rollback: undid {undone}, back to mean={:.5} std_dev={:.2e}",
                belief.mean, belief.std_dev
            );
        }
    }

    // -----------------------------------------------------------------
    // 3. Batch of trials.
    // -----------------------------------------------------------------
    let s = run_trials(&walk, hidden_phase, 500, 7);
    println!(
        "500 trials: median |err|={:.2e}  mean |err|={:.2e}  rms={:.2e}  calls/run={:.1}  rollbacks/run={:.2}  reached target={:.1}%",
        s.median_abs_error,
        s.mean_abs_error,
        s.rms_error,
        s.mean_samples,
        s.mean_rollbacks,
        s.target_rate * 100.0,
    );
    Ok(())
}
