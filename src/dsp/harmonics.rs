//! Frequency deviation from a set of harmonic partials.
//!
//! A piezo can only play one square wave at a time, so "harmonics" are faked
//! by wobbling the fundamental: each partial contributes a sine at `h * base`
//! evaluated on a millisecond grid, and the summed deviation scales the base
//! frequency by up to ±10% per unit of amplitude.

use std::f32::consts::TAU;

/// Steps generated per millisecond of requested duration.
pub const STEPS_PER_MS: u32 = 100;
/// Pacing between harmonic steps (ms).
pub const STEP_INTERVAL_MS: u32 = 10;
/// Synthesis noise applied to each harmonic step.
pub const HARMONIC_NOISE: f32 = 0.02;
/// Fraction of the base frequency one unit of deviation moves the pitch.
const DEVIATION_DEPTH: f32 = 0.1;

/// Number of steps for a harmonic tone of `duration_ms`.
pub fn total_steps(duration_ms: u32) -> usize {
    duration_ms as usize * STEPS_PER_MS as usize
}

/// Summed harmonic deviation at step `index`. `amplitudes[0]` is the
/// fundamental (h = 1).
pub fn variation(base_hz: f32, amplitudes: &[f32], index: usize) -> f32 {
    amplitudes
        .iter()
        .enumerate()
        .map(|(n, amp)| {
            let h = (n + 1) as f32;
            amp * (TAU * h * base_hz * index as f32 / 1000.0).sin()
        })
        .sum()
}

/// Target frequency at step `index`.
pub fn frequency_at(base_hz: f32, amplitudes: &[f32], index: usize) -> f32 {
    base_hz * (1.0 + variation(base_hz, amplitudes, index) * DEVIATION_DEPTH)
}
