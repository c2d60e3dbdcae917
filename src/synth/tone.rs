#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A requested pitch: either silence or a target frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Silent,
    Hz(f32),
}

impl Tone {
    /// Map the script convention "0 Hz means mute" onto `Tone`.
    ///
    /// Any non-positive (or NaN) frequency is silence.
    pub fn from_hz(hz: f32) -> Self {
        if hz > 0.0 {
            Tone::Hz(hz)
        } else {
            Tone::Silent
        }
    }
}

/// One instantaneous output value for the PWM peripheral.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSample {
    pub frequency_hz: f32,
    pub duty_cycle: u16,
}

impl ToneSample {
    pub const SILENT: ToneSample = ToneSample {
        frequency_hz: 0.0,
        duty_cycle: 0,
    };

    pub fn is_silent(&self) -> bool {
        self.duty_cycle == 0 && self.frequency_hz == 0.0
    }

    /// Integer frequency written to the PWM peripheral (truncated).
    pub fn pwm_frequency(&self) -> u32 {
        self.frequency_hz as u32
    }
}

impl Default for ToneSample {
    fn default() -> Self {
        Self::SILENT
    }
}
