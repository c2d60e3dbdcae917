//! Detonation and its aftermath.

use crate::{
    dsp::{
        envelope::{echo_strength, power_rise},
        sweep::SweepSpec,
    },
    hardware::{Hardware, Led},
    sequencing::{error::ShowError, monitor::ShowMonitor, sequencer::PhaseSequencer},
};

const ECHO_DECAY: f32 = 0.7;

pub(super) fn detonation<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    // Final count: rising fuse whine
    for count in ["THREE", "TWO", "ONE"] {
        seq.status(count);
        seq.sweep(SweepSpec::new(200.0, 500.0, 300, 1.5))?;
        seq.set_led(Led::Red, true);
        seq.pause(100)?;
    }

    // Initiating pulse: the explicit duty lands after the tone and wins
    seq.play_hz(4000.0, 0.1)?;
    seq.set_duty(25000.0);
    seq.set_led(Led::Red, true);
    seq.set_led(Led::Green, true);
    seq.pause(50)?;

    // Silence before the shock wave
    seq.play_hz(0.0, 0.0)?;
    seq.pause(150)?;

    seq.status("SHOCK WAVE");
    for i in 0..80u32 {
        let t = i as f32 / 80.0;
        let freq = power_rise(30.0, 200.0, t, 0.7);
        let sub_bass = (t * 10.0).sin() * 15.0 * t;

        seq.set_duty(8000.0 + (t * 20000.0).trunc());
        seq.play_hz(freq + sub_bass, 0.3 * t)?;

        if i < 40 {
            seq.set_led(Led::Red, true);
            seq.set_led(Led::Green, true);
        } else {
            seq.set_led(Led::Red, i % 2 == 0);
            seq.set_led(Led::Green, i % 3 == 0);
        }
        seq.pause(15)?;
    }

    seq.status("RESONANCE AND ECHOES");
    for echo in 0..10u32 {
        let strength = echo_strength(echo, ECHO_DECAY);
        let flash_ms = (80.0 * strength) as u32;

        seq.play_hz(80.0 * strength, 0.1 * strength)?;

        seq.set_led(Led::Red, true);
        seq.pause(flash_ms)?;
        seq.set_led(Led::Red, false);
        seq.set_led(Led::Green, true);
        seq.pause(flash_ms)?;
        seq.set_led(Led::Green, false);

        seq.pause(150)?;
    }

    seq.status("BACKGROUND RADIATION");
    for _ in 0..100 {
        let freq = 50.0 + seq.chance() * 100.0;
        let noise = seq.chance() * 0.4;
        seq.play_hz(freq, noise)?;

        // Damaged electronics flicker
        if seq.chance() > 0.7 {
            seq.set_led(Led::Red, true);
            seq.pause(20)?;
            seq.set_led(Led::Red, false);
        }
        if seq.chance() > 0.8 {
            seq.set_led(Led::Green, true);
            seq.pause(10)?;
            seq.set_led(Led::Green, false);
        }
        seq.pause(50)?;
    }

    seq.play_hz(0.0, 0.0)?;
    seq.set_led(Led::Red, false);
    seq.set_led(Led::Green, false);
    seq.status("DETONATION SEQUENCE COMPLETE");
    Ok(())
}

/// Smouldering fires: low embers with occasional crackles.
pub(super) fn post_detonation<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    for i in 0..150u32 {
        if seq.chance() > 0.9 {
            let crackle = seq.scatter_range(800..=2000);
            seq.play_hz(crackle as f32, 0.3)?;
            seq.set_led(Led::Red, true);
            seq.pause(100)?;
            seq.play_hz(0.0, 0.0)?;
            seq.set_led(Led::Red, false);
        }

        let ember = 60.0 + (i as f32 * 0.1).sin() * 20.0;
        seq.play_hz(ember, 0.15)?;

        seq.set_led(Led::Red, i % 5 < 2);
        let flicker = seq.chance() > 0.95;
        seq.set_led(Led::Green, flicker);
        seq.pause(100)?;
    }
    Ok(())
}
