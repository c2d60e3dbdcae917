//! Control-rate modulation helpers.

/*
Control-Rate Modulation
=======================

Nothing in this crate renders audio samples. The piezo is driven by a PWM
peripheral, so "modulation" means changing the PWM frequency or duty a few
hundred times per second from the show loop. Every wobble, vibration, or
breathing texture in the phase scripts is a sine evaluated at control rate:

    value = sin(x)              where x grows with time or step index

Vocabulary
----------

  bipolar     Output swings -1.0 to +1.0. Used for vibrato-like offsets
              (engine vibration, harmonics added to a base frequency).

  unipolar    Output is 0.0 to 1.0. Used to scale between a floor and a
              ceiling (duty between DUTY_MIN and DUTY_MAX, pulse depth).
              unipolar = bipolar * 0.5 + 0.5

  rate        The multiplier on the time/step variable. The duty envelope
              uses sin(ms / 50), i.e. 0.02 rad/ms:

                  period = 2π / rate = 2π * 50 ms ≈ 314 ms

    bipolar   unipolar
    -1.0      0.0
     0.0      0.5
    +1.0      1.0
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    bipolar * 0.5 + 0.5
}

/// Unipolar sine at `x` radians.
#[inline]
pub fn unipolar_sine(x: f32) -> f32 {
    bipolar_to_unipolar(x.sin())
}
