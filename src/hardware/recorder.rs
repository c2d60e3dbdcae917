#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Hardware, Led};
use crate::sequencing::AbortSignal;

/// One call made across the hardware boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareCall {
    PwmFrequency(u32),
    PwmDuty(u16),
    DeinitPwm,
    SetLed(Led, bool),
    ToggleLed(Led),
    Sleep(u32),
}

/// Hardware double that records every call and runs on a virtual clock.
///
/// `sleep_ms` returns immediately and advances the clock, so a full show
/// runs in milliseconds. Optionally triggers an `AbortSignal` once the
/// virtual clock reaches a given time, simulating an operator abort.
#[derive(Debug, Default)]
pub struct RecordingHardware {
    calls: Vec<HardwareCall>,
    clock_ms: u64,
    leds: [bool; 2],
    pwm_frequency: u32,
    pwm_duty: u16,
    pwm_released: bool,
    abort_at: Option<(u64, AbortSignal)>,
}

impl RecordingHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger `signal` once the virtual clock reaches `at_ms`.
    pub fn abort_at(mut self, at_ms: u64, signal: AbortSignal) -> Self {
        self.abort_at = Some((at_ms, signal));
        self
    }

    pub fn calls(&self) -> &[HardwareCall] {
        &self.calls
    }

    pub fn count(&self, call: HardwareCall) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }

    pub fn led(&self, led: Led) -> bool {
        self.leds[led.index()]
    }

    pub fn pwm_frequency(&self) -> u32 {
        self.pwm_frequency
    }

    pub fn pwm_duty(&self) -> u16 {
        self.pwm_duty
    }

    pub fn is_released(&self) -> bool {
        self.pwm_released
    }

    /// Virtual time elapsed so far (sum of all sleeps).
    pub fn elapsed_ms(&self) -> u64 {
        self.clock_ms
    }
}

impl Hardware for RecordingHardware {
    fn set_pwm_frequency(&mut self, hz: u32) {
        self.pwm_frequency = hz;
        self.calls.push(HardwareCall::PwmFrequency(hz));
    }

    fn set_pwm_duty(&mut self, level: u16) {
        self.pwm_duty = level;
        self.calls.push(HardwareCall::PwmDuty(level));
    }

    fn deinit_pwm(&mut self) {
        self.pwm_released = true;
        self.calls.push(HardwareCall::DeinitPwm);
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.leds[led.index()] = on;
        self.calls.push(HardwareCall::SetLed(led, on));
    }

    fn toggle_led(&mut self, led: Led) {
        self.leds[led.index()] = !self.leds[led.index()];
        self.calls.push(HardwareCall::ToggleLed(led));
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.clock_ms += ms as u64;
        self.calls.push(HardwareCall::Sleep(ms));
        if let Some((at_ms, signal)) = &self.abort_at {
            if self.clock_ms >= *at_ms {
                signal.trigger();
            }
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut hw = RecordingHardware::new();
        hw.set_pwm_frequency(440);
        hw.set_pwm_duty(15_000);
        hw.set_led(Led::Red, true);
        hw.sleep_ms(20);
        hw.deinit_pwm();

        assert_eq!(
            hw.calls(),
            &[
                HardwareCall::PwmFrequency(440),
                HardwareCall::PwmDuty(15_000),
                HardwareCall::SetLed(Led::Red, true),
                HardwareCall::Sleep(20),
                HardwareCall::DeinitPwm,
            ]
        );
        assert!(hw.is_released());
    }

    #[test]
    fn test_virtual_clock_advances_on_sleep() {
        let mut hw = RecordingHardware::new();
        assert_eq!(hw.now_ms(), 0);
        hw.sleep_ms(150);
        hw.sleep_ms(1);
        assert_eq!(hw.now_ms(), 151);
        assert_eq!(hw.elapsed_ms(), 151);
    }

    #[test]
    fn test_toggle_tracks_led_state() {
        let mut hw = RecordingHardware::new();
        assert!(!hw.led(Led::Green));
        hw.toggle_led(Led::Green);
        assert!(hw.led(Led::Green));
        hw.toggle_led(Led::Green);
        assert!(!hw.led(Led::Green));
        assert_eq!(hw.count(HardwareCall::ToggleLed(Led::Green)), 2);
    }

    #[test]
    fn test_abort_at_triggers_signal() {
        let signal = AbortSignal::new();
        let mut hw = RecordingHardware::new().abort_at(100, signal.clone());
        hw.sleep_ms(99);
        assert!(!signal.is_triggered());
        hw.sleep_ms(1);
        assert!(signal.is_triggered());
    }
}
