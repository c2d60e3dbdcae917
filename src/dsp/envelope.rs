use crate::{dsp::lfo::unipolar_sine, DUTY_MAX, DUTY_MIN, PWM_RANGE};

/*
Envelopes
=========

Two kinds of envelope shape what reaches the PWM peripheral.

Duty "breathing"
----------------

Every tone the synthesizer produces carries a duty cycle that slowly
oscillates with wall-clock time, independent of the requested pitch:

    duty = DUTY_MIN + (sin(ms / 50) * 0.5 + 0.5) * (DUTY_MAX - DUTY_MIN)

  Duty
  30000 ┤   ╭─╮       ╭─╮       ╭─╮
        │  ╱   ╲     ╱   ╲     ╱   ╲
   1000 ┤─╯     ╰───╯     ╰───╯     ╰─
        └────────────────────────────→ ms
             ~314 ms per cycle

On a piezo, duty mostly changes loudness and timbre, so this reads as a
soft pulsing layered on top of whatever the script plays. The range stays
well under half of the 16-bit register: above ~50% a piezo gets quieter
again, and below DUTY_MIN it is inaudible.

Phase envelopes
---------------

The scripts reuse a handful of closed-form curves:

  doppler      f = f0 / (1 + k*t)         receding source, pitch falls off
  echo         strength = decay^n         geometric attenuation per repeat
  power rise   f = base + span * p^e      non-linear build-up (engine, shock)

They are pure functions of their inputs; the tuned constants live with the
scripts that use them.
*/

const BREATHING_DIVISOR_MS: f64 = 50.0;

/// Duty cycle of the breathing envelope at `elapsed_ms`.
#[inline]
pub fn breathing_duty(elapsed_ms: u64) -> u16 {
    let phase = (elapsed_ms as f64 / BREATHING_DIVISOR_MS) as f32;
    let span = (DUTY_MAX - DUTY_MIN) as f32;
    let duty = DUTY_MIN as f32 + unipolar_sine(phase) * span;
    // Guard against float overshoot at the peak.
    (duty as u16).clamp(DUTY_MIN, DUTY_MAX)
}

/// Convert a script-computed duty level to the PWM register range.
///
/// Truncates toward zero and saturates to `[0, PWM_RANGE]`.
#[inline]
pub fn duty_level(level: f32) -> u16 {
    level.clamp(0.0, PWM_RANGE as f32) as u16
}

/// Doppler-style decay factor `1 / (1 + k*t)`.
#[inline]
pub fn doppler_factor(t: f32, k: f32) -> f32 {
    1.0 / (1.0 + t * k)
}

/// Strength of the `n`-th echo: `decay^n`.
#[inline]
pub fn echo_strength(n: u32, decay: f32) -> f32 {
    decay.powi(n as i32)
}

/// `base + span * progress^exponent`.
#[inline]
pub fn power_rise(base: f32, span: f32, progress: f32, exponent: f32) -> f32 {
    base + span * progress.powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathing_duty_bounds() {
        for ms in (0..200_000u64).step_by(7) {
            let duty = breathing_duty(ms);
            assert!((DUTY_MIN..=DUTY_MAX).contains(&duty), "duty {} at {}ms", duty, ms);
        }
    }

    #[test]
    fn test_breathing_duty_midpoint_at_zero() {
        // sin(0) = 0 -> halfway between min and max
        assert_eq!(breathing_duty(0), 15_500);
    }

    #[test]
    fn test_breathing_duty_peak_and_trough() {
        // sin(pi/2) peak at ~78.5ms, trough at ~235.6ms
        assert!(breathing_duty(79) > 29_900);
        assert!(breathing_duty(236) < 1_100);
    }

    #[test]
    fn test_duty_level_saturates() {
        assert_eq!(duty_level(-15_000.0), 0);
        assert_eq!(duty_level(12_345.9), 12_345);
        assert_eq!(duty_level(1.0e9), PWM_RANGE);
    }

    #[test]
    fn test_doppler_factor() {
        assert_eq!(doppler_factor(0.0, 0.015), 1.0);
        // 300 Hz base after 100 steps of k=0.015: 300 / 2.5 = 120 Hz
        assert!((300.0 * doppler_factor(100.0, 0.015) - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_echo_strength() {
        assert_eq!(echo_strength(0, 0.7), 1.0);
        assert!((echo_strength(1, 0.7) - 0.7).abs() < 1e-6);
        assert!((echo_strength(3, 0.7) - 0.343).abs() < 1e-6);
    }

    #[test]
    fn test_power_rise() {
        assert_eq!(power_rise(80.0, 220.0, 0.0, 1.5), 80.0);
        assert!((power_rise(80.0, 220.0, 1.0, 1.5) - 300.0).abs() < 1e-4);
        assert!((power_rise(30.0, 200.0, 0.25, 0.7) - (30.0 + 200.0 * 0.25f32.powf(0.7))).abs() < 1e-4);
    }
}
