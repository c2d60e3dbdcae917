pub mod dsp; // Noise, sweep, and envelope math
pub mod hardware; // PWM/LED/clock capability boundary
pub mod sequencing; // Phase scripts and the show runner
pub mod synth; // Tone synthesizer

pub use hardware::{Hardware, Led};
pub use sequencing::{AbortSignal, PhaseId, PhaseSequencer, ShowConfig, ShowError, ShowOutcome};
pub use synth::{Tone, ToneSample, ToneSynthesizer};

/// Nominal synthesis rate used to size sweeps (steps per second of sweep).
pub const SAMPLE_RATE: u32 = 40_000;
/// Full scale of the 16-bit PWM duty register.
pub const PWM_RANGE: u16 = 65_535;
pub const DUTY_MIN: u16 = 1_000;
pub const DUTY_MAX: u16 = 30_000;

/// Output frequency bounds for the piezo (Hz).
pub const FREQ_MIN_HZ: f32 = 20.0;
pub const FREQ_MAX_HZ: f32 = 5_000.0;

/// Noise amount applied to every sweep step.
pub const SWEEP_NOISE: f32 = 0.1;
/// Pacing between sweep steps (ms).
pub const SWEEP_STEP_MS: u32 = 1;

/// Seed the Brownian noise source starts from unless configured otherwise.
pub const DEFAULT_NOISE_SEED: u32 = 12_345;
