use crate::{
    dsp::{envelope::breathing_duty, harmonics, noise::BrownianNoise, sweep::SweepSpec},
    synth::tone::{Tone, ToneSample},
    FREQ_MAX_HZ, FREQ_MIN_HZ, SWEEP_NOISE, SWEEP_STEP_MS,
};

/// Stateful tone generator.
///
/// Owns the Brownian noise source, so two synthesizers built from the same
/// seed produce identical sample streams for identical requests.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    noise: BrownianNoise,
}

impl ToneSynthesizer {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: BrownianNoise::new(seed),
        }
    }

    /// Current noise seed.
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Draw from the shared noise source, in `[-amount, +amount)`.
    ///
    /// Scripts use this for extra "combustion" randomness; it advances the
    /// same seed the tone shaping uses.
    pub fn noise(&mut self, amount: f32) -> f32 {
        self.noise.sample(amount)
    }

    /// Shape a requested tone into a hardware sample.
    ///
    /// Silence short-circuits: no noise is drawn and the duty is zero.
    /// `Tone::Hz` with a target of 0 Hz or below (or NaN) counts as silence.
    pub fn shape(&mut self, tone: Tone, noise_amount: f32, elapsed_ms: u64) -> ToneSample {
        let target_hz = match tone {
            Tone::Hz(hz) if hz > 0.0 => hz,
            _ => return ToneSample::SILENT,
        };

        let actual = target_hz * (1.0 + self.noise.sample(noise_amount));
        ToneSample {
            frequency_hz: actual.clamp(FREQ_MIN_HZ, FREQ_MAX_HZ),
            duty_cycle: breathing_duty(elapsed_ms),
        }
    }

    /// `shape` with the "0 Hz or below is silence" convention.
    pub fn shape_frequency(&mut self, target_hz: f32, noise_amount: f32, elapsed_ms: u64) -> ToneSample {
        self.shape(Tone::from_hz(target_hz), noise_amount, elapsed_ms)
    }

    /// Run a sweep, handing every shaped step to `sink`.
    ///
    /// Step `i` is stamped `start_ms + i * SWEEP_STEP_MS`: the caller is
    /// expected to pace steps at that interval. An error from `sink` stops
    /// the sweep and is returned.
    pub fn sweep<E, F>(&mut self, spec: &SweepSpec, start_ms: u64, mut sink: F) -> Result<(), E>
    where
        F: FnMut(ToneSample, usize, usize) -> Result<(), E>,
    {
        for step in spec.steps() {
            let elapsed = start_ms + step.index as u64 * SWEEP_STEP_MS as u64;
            let sample = self.shape_frequency(step.frequency_hz, SWEEP_NOISE, elapsed);
            sink(sample, step.index, step.total)?;
        }
        Ok(())
    }

    /// Play `base_hz` wobbled by harmonic partials for `duration_ms`.
    ///
    /// Steps are stamped every `harmonics::STEP_INTERVAL_MS` from `start_ms`.
    pub fn harmonics<E, F>(
        &mut self,
        base_hz: f32,
        amplitudes: &[f32],
        duration_ms: u32,
        start_ms: u64,
        mut sink: F,
    ) -> Result<(), E>
    where
        F: FnMut(ToneSample, usize, usize) -> Result<(), E>,
    {
        let total = harmonics::total_steps(duration_ms);
        for index in 0..total {
            let elapsed = start_ms + index as u64 * harmonics::STEP_INTERVAL_MS as u64;
            let target = harmonics::frequency_at(base_hz, amplitudes, index);
            let sample = self.shape_frequency(target, harmonics::HARMONIC_NOISE, elapsed);
            sink(sample, index, total)?;
        }
        Ok(())
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new(crate::DEFAULT_NOISE_SEED)
    }
}
