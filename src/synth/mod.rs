// Purpose: turn requested pitches into hardware-ready (frequency, duty) samples.
// Sits between the dsp primitives and the sequencer; never touches hardware.

pub mod synthesizer;
pub mod tone;

pub use synthesizer::ToneSynthesizer;
pub use tone::{Tone, ToneSample};
