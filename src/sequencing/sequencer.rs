//! PhaseSequencer - runs the show against a `Hardware` implementation.
//!
//! The whole show is one synchronous call stack: phases run strictly in
//! order, every step blocks on `Hardware::sleep_ms`, and the abort signal is
//! polled at each loop boundary. Whatever happens, the hardware is silenced
//! and released exactly once at the end of a run.

use std::ops::{Deref, DerefMut, RangeInclusive};

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    abort::AbortSignal,
    config::ShowConfig,
    error::ShowError,
    monitor::{ShowEvent, ShowMonitor},
    phase::{LedAction, PhaseId, ShowStep},
    scripts,
};
use crate::{
    dsp::{envelope::duty_level, harmonics, sweep::SweepSpec},
    hardware::{Hardware, Led},
    synth::{Tone, ToneSample, ToneSynthesizer},
    SWEEP_STEP_MS,
};

/// How a run ended. Interruption is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    Completed,
    Interrupted { phase: PhaseId },
}

pub struct PhaseSequencer<H: Hardware, M: ShowMonitor = ()> {
    hw: H,
    synth: ToneSynthesizer,
    /// Independent draws (crackle chance, flicker, jitter)
    scatter: StdRng,
    config: ShowConfig,
    abort: AbortSignal,
    monitor: M,
    /// Phase reported if an abort is observed
    current: PhaseId,
    cleaned_up: bool,
}

impl<H: Hardware> PhaseSequencer<H> {
    pub fn new(hw: H, config: ShowConfig) -> Self {
        Self {
            hw,
            synth: ToneSynthesizer::new(config.noise_seed),
            scatter: StdRng::seed_from_u64(config.scatter_seed),
            config,
            abort: AbortSignal::new(),
            monitor: (),
            current: PhaseId::SystemInit,
            cleaned_up: false,
        }
    }
}

impl<H: Hardware, M: ShowMonitor> PhaseSequencer<H, M> {
    /// Attach a monitor that receives phase and status events.
    pub fn with_monitor<N: ShowMonitor>(self, monitor: N) -> PhaseSequencer<H, N> {
        PhaseSequencer {
            hw: self.hw,
            synth: self.synth,
            scatter: self.scatter,
            config: self.config,
            abort: self.abort,
            monitor,
            current: self.current,
            cleaned_up: self.cleaned_up,
        }
    }

    /// Use an existing abort signal (e.g. one shared with a Ctrl+C handler).
    pub fn with_abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort = signal;
        self
    }

    pub fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    pub fn synthesizer(&self) -> &ToneSynthesizer {
        &self.synth
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }

    pub fn into_parts(self) -> (H, M) {
        (self.hw, self.monitor)
    }

    /// Run every phase in order, then clean up.
    pub fn run_full(&mut self) -> Result<ShowOutcome, ShowError> {
        info!("{}", "=".repeat(60));
        info!("PIEZO FX LAUNCH SIMULATOR");
        info!("{}", "=".repeat(60));
        let pauses = self.config.pauses;
        self.run_guarded(&PhaseId::FULL_SHOW, pauses)
    }

    /// Run a single phase, then clean up.
    pub fn run_phase(&mut self, phase: PhaseId) -> Result<ShowOutcome, ShowError> {
        self.run_guarded(&[phase], false)
    }

    /// Run the phase behind selector 1..=6, then clean up.
    pub fn run_selected(&mut self, selector: u8) -> Result<ShowOutcome, ShowError> {
        let phase = PhaseId::from_selector(selector).ok_or(ShowError::UnknownPhase(selector))?;
        self.run_phase(phase)
    }

    fn run_guarded(&mut self, phases: &[PhaseId], pauses: bool) -> Result<ShowOutcome, ShowError> {
        if self.cleaned_up {
            return Err(ShowError::AlreadyCleanedUp);
        }

        // Cleanup runs when the guard drops, including on panic.
        let mut guard = CleanupGuard { sequencer: self };
        let outcome = match guard.run_phases(phases, pauses) {
            Ok(()) => ShowOutcome::Completed,
            Err(ShowError::Interrupted { phase }) => {
                warn!("SEQUENCE INTERRUPTED during {}", phase);
                ShowOutcome::Interrupted { phase }
            }
            Err(err) => return Err(err),
        };
        guard.cleanup();
        guard.emit(ShowEvent::Finished(outcome));
        Ok(outcome)
    }

    fn run_phases(&mut self, phases: &[PhaseId], pauses: bool) -> Result<(), ShowError> {
        let total = phases.len();
        for (index, &phase) in phases.iter().enumerate() {
            self.current = phase;
            self.checkpoint()?;

            info!("[{}/{}] {}", index + 1, total, phase.banner());
            self.emit(ShowEvent::PhaseStarted(phase));
            scripts::run(self, phase)?;
            self.emit(ShowEvent::PhaseFinished(phase));

            if pauses {
                self.pause(phase.pause_after_ms())?;
            }
        }
        Ok(())
    }

    /// Silence the buzzer, turn both LEDs off and release the PWM channel.
    ///
    /// Idempotent: only the first call touches the hardware. Returns whether
    /// this call performed the cleanup.
    pub fn cleanup(&mut self) -> bool {
        if self.cleaned_up {
            return false;
        }
        self.cleaned_up = true;

        debug!("cleanup: buzzer off, LEDs off, PWM released");
        apply_sample(&mut self.hw, ToneSample::SILENT);
        self.hw.set_led(Led::Green, false);
        self.hw.set_led(Led::Red, false);
        self.hw.deinit_pwm();
        self.emit(ShowEvent::CleanedUp);
        true
    }

    fn emit(&mut self, event: ShowEvent) {
        self.monitor.on_event(event);
    }

    // ----- Stage operations used by the phase scripts -----

    /// `Err(Interrupted)` once the abort signal is set.
    pub fn checkpoint(&self) -> Result<(), ShowError> {
        if self.abort.is_triggered() {
            Err(ShowError::Interrupted {
                phase: self.current,
            })
        } else {
            Ok(())
        }
    }

    /// Shape `tone` at the current time and write it to the PWM channel.
    pub fn play(&mut self, tone: Tone, noise_amount: f32) -> Result<ToneSample, ShowError> {
        self.checkpoint()?;
        let now = self.hw.now_ms();
        let sample = self.synth.shape(tone, noise_amount, now);
        trace!("{:>8}ms {:?} -> {:?}", now, tone, sample);
        apply_sample(&mut self.hw, sample);
        Ok(sample)
    }

    /// `play` with the "0 Hz or below is silence" convention.
    pub fn play_hz(&mut self, hz: f32, noise_amount: f32) -> Result<ToneSample, ShowError> {
        self.play(Tone::from_hz(hz), noise_amount)
    }

    /// Write a script-computed duty level straight to the PWM channel.
    pub fn set_duty(&mut self, level: f32) {
        self.hw.set_pwm_duty(duty_level(level));
    }

    pub fn set_led(&mut self, led: Led, on: bool) {
        self.hw.set_led(led, on);
    }

    pub fn toggle_led(&mut self, led: Led) {
        self.hw.toggle_led(led);
    }

    pub fn apply_led(&mut self, led: Led, action: LedAction) {
        match action {
            LedAction::Keep => {}
            LedAction::On => self.hw.set_led(led, true),
            LedAction::Off => self.hw.set_led(led, false),
            LedAction::Toggle => self.hw.toggle_led(led),
        }
    }

    /// Block for `ms`. Zero skips the sleep but still checks for abort.
    pub fn pause(&mut self, ms: u32) -> Result<(), ShowError> {
        self.checkpoint()?;
        if ms > 0 {
            self.hw.sleep_ms(ms);
        }
        Ok(())
    }

    /// Play a sweep, one step per `SWEEP_STEP_MS`.
    pub fn sweep(&mut self, spec: SweepSpec) -> Result<(), ShowError> {
        self.checkpoint()?;
        debug!(
            "sweep {:.0} -> {:.0} Hz over {}ms (curve {})",
            spec.start_hz, spec.end_hz, spec.duration_ms, spec.curve_exponent
        );

        let PhaseSequencer {
            hw,
            synth,
            abort,
            current,
            ..
        } = self;
        let phase = *current;
        let start = hw.now_ms();
        synth.sweep(&spec, start, |sample, _, _| {
            if abort.is_triggered() {
                return Err(ShowError::Interrupted { phase });
            }
            apply_sample(hw, sample);
            hw.sleep_ms(SWEEP_STEP_MS);
            Ok(())
        })
    }

    /// Play `base_hz` wobbled by harmonic partials for `duration_ms`.
    pub fn play_harmonics(&mut self, base_hz: f32, amplitudes: &[f32], duration_ms: u32) -> Result<(), ShowError> {
        self.checkpoint()?;
        debug!("harmonics {:.0} Hz x{} partials over {}ms", base_hz, amplitudes.len(), duration_ms);

        let PhaseSequencer {
            hw,
            synth,
            abort,
            current,
            ..
        } = self;
        let phase = *current;
        let start = hw.now_ms();
        synth.harmonics(base_hz, amplitudes, duration_ms, start, |sample, _, _| {
            if abort.is_triggered() {
                return Err(ShowError::Interrupted { phase });
            }
            apply_sample(hw, sample);
            hw.sleep_ms(harmonics::STEP_INTERVAL_MS);
            Ok(())
        })
    }

    /// Execute table steps: status line, tone, LEDs, hold.
    pub fn run_steps(&mut self, steps: &[ShowStep]) -> Result<(), ShowError> {
        for step in steps {
            if let Some(line) = step.status {
                self.status(line);
            }
            match step.tone {
                Some(tone) => {
                    self.play(tone, step.noise)?;
                }
                None => self.checkpoint()?,
            }
            self.apply_led(Led::Red, step.red);
            self.apply_led(Led::Green, step.green);
            self.pause(step.hold_ms)?;
        }
        Ok(())
    }

    /// Emit a console status line.
    pub fn status(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{}", line);
        self.emit(ShowEvent::Status(line));
    }

    /// Draw from the synthesizer's Brownian noise (shares its seed).
    pub fn noise(&mut self, amount: f32) -> f32 {
        self.synth.noise(amount)
    }

    /// Uniform draw in `[0, 1)` from the scatter generator.
    pub fn chance(&mut self) -> f32 {
        self.scatter.random::<f32>()
    }

    /// Uniform integer in `range` from the scatter generator.
    pub fn scatter_range(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.scatter.random_range(range)
    }
}

/// Write a sample: silence only zeroes the duty, a tone sets frequency then duty.
fn apply_sample<H: Hardware>(hw: &mut H, sample: ToneSample) {
    if sample.is_silent() {
        hw.set_pwm_duty(0);
    } else {
        hw.set_pwm_frequency(sample.pwm_frequency());
        hw.set_pwm_duty(sample.duty_cycle);
    }
}

/// Runs `cleanup` on every exit path of a guarded run.
struct CleanupGuard<'a, H: Hardware, M: ShowMonitor> {
    sequencer: &'a mut PhaseSequencer<H, M>,
}

impl<H: Hardware, M: ShowMonitor> Deref for CleanupGuard<'_, H, M> {
    type Target = PhaseSequencer<H, M>;

    fn deref(&self) -> &Self::Target {
        self.sequencer
    }
}

impl<H: Hardware, M: ShowMonitor> DerefMut for CleanupGuard<'_, H, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sequencer
    }
}

impl<H: Hardware, M: ShowMonitor> Drop for CleanupGuard<'_, H, M> {
    fn drop(&mut self) {
        self.sequencer.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{HardwareCall, RecordingHardware};

    fn sequencer() -> PhaseSequencer<RecordingHardware> {
        PhaseSequencer::new(RecordingHardware::new(), ShowConfig::default())
    }

    #[test]
    fn test_silent_tone_only_zeroes_duty() {
        let mut seq = sequencer();
        let sample = seq.play_hz(0.0, 0.5).unwrap();
        assert_eq!(sample, ToneSample::SILENT);
        assert_eq!(seq.hardware().calls(), &[HardwareCall::PwmDuty(0)]);
    }

    #[test]
    fn test_tone_writes_frequency_then_duty() {
        let mut seq = sequencer();
        let sample = seq.play_hz(440.0, 0.0).unwrap();
        assert_eq!(
            seq.hardware().calls(),
            &[
                HardwareCall::PwmFrequency(440),
                HardwareCall::PwmDuty(sample.duty_cycle),
            ]
        );
    }

    #[test]
    fn test_pause_zero_skips_sleep() {
        let mut seq = sequencer();
        seq.pause(0).unwrap();
        assert!(seq.hardware().calls().is_empty());
        seq.pause(5).unwrap();
        assert_eq!(seq.hardware().calls(), &[HardwareCall::Sleep(5)]);
    }

    #[test]
    fn test_checkpoint_reports_current_phase() {
        let mut seq = sequencer();
        seq.current = PhaseId::Boost;
        seq.abort_signal().trigger();
        assert_eq!(
            seq.pause(10),
            Err(ShowError::Interrupted {
                phase: PhaseId::Boost
            })
        );
        assert!(seq.play_hz(100.0, 0.0).is_err());
        assert!(seq.hardware().calls().is_empty());
    }

    #[test]
    fn test_sweep_paces_every_step() {
        let mut seq = sequencer();
        seq.sweep(SweepSpec::linear(400.0, 800.0, 1)).unwrap();
        let hw = seq.hardware();
        assert_eq!(hw.count(HardwareCall::Sleep(1)), 40);
        assert_eq!(hw.elapsed_ms(), 40);
    }

    #[test]
    fn test_sweep_observes_abort_mid_way() {
        let signal = AbortSignal::new();
        let hw = RecordingHardware::new().abort_at(10, signal.clone());
        let mut seq = PhaseSequencer::new(hw, ShowConfig::default()).with_abort_signal(signal);
        let result = seq.sweep(SweepSpec::linear(400.0, 800.0, 50));
        assert!(matches!(result, Err(ShowError::Interrupted { .. })));
        assert_eq!(seq.hardware().elapsed_ms(), 10);
    }

    #[test]
    fn test_harmonics_pacing() {
        let mut seq = sequencer();
        seq.play_harmonics(220.0, &[1.0, 0.5, 0.25], 1).unwrap();
        assert_eq!(seq.hardware().count(HardwareCall::Sleep(10)), 100);
        assert_eq!(seq.hardware().elapsed_ms(), 1_000);
    }

    #[test]
    fn test_zero_hz_step_is_silence() {
        let mut seq = sequencer();
        let seed = seq.synthesizer().seed();
        seq.run_steps(&[ShowStep::tone(0.0, 0.5).hold(5), ShowStep::tone(-1.0, 0.5)])
            .unwrap();
        assert_eq!(
            seq.hardware().calls(),
            &[
                HardwareCall::PwmDuty(0),
                HardwareCall::Sleep(5),
                HardwareCall::PwmDuty(0),
            ]
        );
        assert_eq!(seq.synthesizer().seed(), seed);
    }

    #[test]
    fn test_run_steps_order() {
        let mut seq = sequencer();
        let steps = [
            ShowStep::silence().red(LedAction::On).green(LedAction::Toggle).hold(7),
            ShowStep::lights().red(LedAction::Off),
        ];
        seq.run_steps(&steps).unwrap();
        assert_eq!(
            seq.hardware().calls(),
            &[
                HardwareCall::PwmDuty(0),
                HardwareCall::SetLed(Led::Red, true),
                HardwareCall::ToggleLed(Led::Green),
                HardwareCall::Sleep(7),
                HardwareCall::SetLed(Led::Red, false),
            ]
        );
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut seq = sequencer();
        assert!(seq.cleanup());
        assert!(!seq.cleanup());
        let hw = seq.hardware();
        assert_eq!(hw.count(HardwareCall::DeinitPwm), 1);
        assert_eq!(
            hw.calls(),
            &[
                HardwareCall::PwmDuty(0),
                HardwareCall::SetLed(Led::Green, false),
                HardwareCall::SetLed(Led::Red, false),
                HardwareCall::DeinitPwm,
            ]
        );
    }

    #[test]
    fn test_cannot_run_after_cleanup() {
        let mut seq = sequencer();
        seq.cleanup();
        assert_eq!(seq.run_phase(PhaseId::Countdown), Err(ShowError::AlreadyCleanedUp));
    }

    #[test]
    fn test_unknown_selector_does_not_touch_hardware() {
        let mut seq = sequencer();
        assert_eq!(seq.run_selected(9), Err(ShowError::UnknownPhase(9)));
        assert!(seq.hardware().calls().is_empty());
        assert!(!seq.is_cleaned_up());
    }

    #[test]
    fn test_cleanup_runs_when_phase_panics() {
        struct PanickyHardware(RecordingHardware);

        impl Hardware for PanickyHardware {
            fn set_pwm_frequency(&mut self, _hz: u32) {
                panic!("driver fault");
            }
            fn set_pwm_duty(&mut self, level: u16) {
                self.0.set_pwm_duty(level)
            }
            fn deinit_pwm(&mut self) {
                self.0.deinit_pwm()
            }
            fn set_led(&mut self, led: Led, on: bool) {
                self.0.set_led(led, on)
            }
            fn toggle_led(&mut self, led: Led) {
                self.0.toggle_led(led)
            }
            fn sleep_ms(&mut self, ms: u32) {
                self.0.sleep_ms(ms)
            }
            fn now_ms(&self) -> u64 {
                self.0.now_ms()
            }
        }

        let mut seq = PhaseSequencer::new(PanickyHardware(RecordingHardware::new()), ShowConfig::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = seq.run_phase(PhaseId::Launch);
        }));
        assert!(result.is_err());
        assert!(seq.is_cleaned_up());
        assert_eq!(seq.hardware().0.count(HardwareCall::DeinitPwm), 1);
    }
}
