//! Benchmarks for the synthesis hot path and whole-show runs.
//!
//! Run with: cargo bench
//!
//! On the device every sweep step has a 1 ms budget (SWEEP_STEP_MS), and
//! a 50 ms sweep is 2000 steps. Shaping a step has to be a tiny fraction
//! of that.
//!
//! Benchmark groups:
//!   - dsp/*        Noise, sweep and envelope primitives
//!   - scenarios/*  Sweeps through the synthesizer and full shows on a virtual clock

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Sweep lengths (ms) found in the show.
pub const SWEEP_LENGTHS_MS: &[u32] = &[50, 300];

criterion_group!(
    benches,
    dsp::bench_noise,
    dsp::bench_sweep,
    dsp::bench_envelope,
    scenarios::bench_synth,
    scenarios::bench_show,
);
criterion_main!(benches);
