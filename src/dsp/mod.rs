//! Low-level math primitives used by the tone synthesizer and the phase scripts.
//!
//! Everything here is allocation-free and deterministic. The modules stay
//! focused on the signal math; the synthesizer layers state on top and the
//! sequencer decides when each value reaches the hardware.

/// Per-phase envelopes and the duty-cycle "breathing" envelope.
pub mod envelope;
/// Frequency deviation from summed harmonics.
pub mod harmonics;
/// Control-rate helpers (bipolar/unipolar conversion, sine evaluation).
pub mod lfo;
/// Linear congruential Brownian noise source.
pub mod noise;
/// Eased frequency sweeps.
pub mod sweep;

pub use noise::BrownianNoise;
pub use sweep::{SweepSpec, SweepStep, SweepSteps};
