//! Capability boundary between the show logic and the device.
//!
//! The sequencer only ever talks to a `Hardware` value it was handed at
//! construction: a PWM channel for the piezo, two LEDs, and a monotonic
//! clock with blocking sleeps. Implementations:
//!
//! - `RecordingHardware`: virtual clock plus a full call trace (tests, dry runs)
//! - `ForwardingHardware`: real-time clock that forwards every write as a
//!   `HardwareMessage` to a simulator front end

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Messages forwarded to simulator front ends.
pub mod message;
/// Call-recording implementation with a virtual clock.
pub mod recorder;

pub use message::{ForwardingHardware, HardwareMessage, MessageSink};
pub use recorder::{HardwareCall, RecordingHardware};

/// The two status LEDs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    Green,
    Red,
}

impl Led {
    pub const ALL: [Led; 2] = [Led::Green, Led::Red];

    /// Stable index for per-LED state arrays.
    pub fn index(self) -> usize {
        match self {
            Led::Green => 0,
            Led::Red => 1,
        }
    }
}

/// PWM, GPIO and clock capabilities the show needs.
///
/// None of these operations can fail on the target device, so the trait is
/// infallible.
pub trait Hardware {
    fn set_pwm_frequency(&mut self, hz: u32);

    /// Duty in `[0, 65535]`; 0 silences the piezo.
    fn set_pwm_duty(&mut self, level: u16);

    /// Release the PWM channel. Called once, from cleanup.
    fn deinit_pwm(&mut self);

    fn set_led(&mut self, led: Led, on: bool);

    fn toggle_led(&mut self, led: Led);

    /// Block for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Monotonic milliseconds since an arbitrary origin.
    fn now_ms(&self) -> u64;
}

impl<H: Hardware + ?Sized> Hardware for &mut H {
    fn set_pwm_frequency(&mut self, hz: u32) {
        (**self).set_pwm_frequency(hz)
    }

    fn set_pwm_duty(&mut self, level: u16) {
        (**self).set_pwm_duty(level)
    }

    fn deinit_pwm(&mut self) {
        (**self).deinit_pwm()
    }

    fn set_led(&mut self, led: Led, on: bool) {
        (**self).set_led(led, on)
    }

    fn toggle_led(&mut self, led: Led) {
        (**self).toggle_led(led)
    }

    fn sleep_ms(&mut self, ms: u32) {
        (**self).sleep_ms(ms)
    }

    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PhaseId, PhaseSequencer, ShowConfig, ShowOutcome};

    #[test]
    fn test_sequencer_can_borrow_hardware() {
        let mut hw = RecordingHardware::new();
        {
            let mut seq = PhaseSequencer::new(&mut hw, ShowConfig::default());
            assert_eq!(seq.run_phase(PhaseId::Finale), Ok(ShowOutcome::Completed));
        }
        assert!(hw.is_released());
        assert_eq!(hw.calls().last(), Some(&HardwareCall::DeinitPwm));
        assert_eq!(hw.elapsed_ms(), 600);
    }
}
