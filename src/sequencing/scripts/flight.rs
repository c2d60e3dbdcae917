//! Engine start through reentry.

use crate::{
    dsp::{
        envelope::{doppler_factor, power_rise},
        lfo::unipolar_sine,
        sweep::SweepSpec,
    },
    hardware::{Hardware, Led},
    sequencing::{error::ShowError, monitor::ShowMonitor, sequencer::PhaseSequencer},
};

/// Ignition squeal, burner sweep, then the main engine spinning up.
pub(super) fn engine_start<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    seq.play_hz(3000.0, 0.1)?;
    seq.set_led(Led::Red, true);
    seq.pause(100)?;

    seq.sweep(SweepSpec::new(2000.0, 800.0, 300, 0.7))?;

    for i in 0..100u32 {
        let progress = i as f32 / 100.0;
        let freq = power_rise(80.0, 220.0, progress, 1.5);
        let vibration = (progress * 50.0).sin() * 15.0 * (1.0 + progress);

        seq.set_duty((progress * 30.0).sin() * 5000.0 + 15000.0);
        seq.play_hz(freq + vibration, 0.08 + progress * 0.1)?;

        seq.set_led(Led::Red, i % 3 == 0);
        seq.set_led(Led::Green, i % 5 == 0);
        seq.pause(20)?;
    }

    seq.status("ENGINE AT FULL THRUST");
    Ok(())
}

/// Two seconds of liftoff: Doppler-falling roar with rising air noise.
pub(super) fn launch<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    const BASE_HZ: f32 = 300.0;
    const DOPPLER_K: f32 = 0.015;

    for t in 0..200u32 {
        let tf = t as f32;
        let main = BASE_HZ * doppler_factor(tf, DOPPLER_K);
        let harmonics = (tf * 0.5).sin() * 40.0 + (tf * 1.7).sin() * 20.0;
        let air_noise = (tf * 0.002).min(0.3);

        seq.set_duty(12000.0 + ((tf * 0.3).sin() * 8000.0 + (tf * 1.2).sin() * 4000.0).trunc());
        seq.play_hz(main + harmonics, air_noise)?;

        if t < 50 {
            seq.set_led(Led::Red, true);
            seq.set_led(Led::Green, false);
        } else {
            seq.set_led(Led::Red, t % 4 < 2);
            seq.set_led(Led::Green, t % 6 < 3);
        }
        seq.pause(10)?;
    }

    seq.status("VEHICLE IN FLIGHT");
    Ok(())
}

/// Three pulsing booster burns with combustion noise.
pub(super) fn boost<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    const COMBUSTION_NOISE: f32 = 0.15;

    for burn in 0..3u32 {
        seq.status(format!("Boost pulse {}/3", burn + 1));

        for i in 0..60u32 {
            let pulse = unipolar_sine(i as f32 * 0.3);
            let base = 180.0 + pulse * 100.0;
            let combustion = seq.noise(COMBUSTION_NOISE);
            let freq = base * (1.0 + combustion);

            seq.set_duty(10000.0 + ((pulse + combustion) * 15000.0).trunc());
            seq.play_hz(freq, 0.12)?;

            seq.set_led(Led::Red, i % 2 == 0);
            seq.set_led(Led::Green, burn % 2 == 0);
            seq.pause(15)?;
        }

        // Short idle between burns
        seq.play_hz(100.0, 0.05)?;
        seq.pause(100)?;
    }

    seq.status("BOOST COMPLETE");
    Ok(())
}

/// Guidance hum punctuated by five correction-thruster chirps.
pub(super) fn midcourse<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    seq.play_hz(120.0, 0.01)?;
    seq.set_led(Led::Green, true);
    seq.pause(500)?;

    for _ in 0..5 {
        seq.sweep(SweepSpec::new(400.0, 800.0, 50, 2.0))?;
        seq.set_led(Led::Red, true);
        seq.pause(20)?;

        seq.play_hz(120.0, 0.01)?;
        seq.set_led(Led::Red, false);
        let jitter = (seq.chance() * 100.0) as u32;
        seq.pause(150 + jitter)?;
    }

    seq.status("TRAJECTORY CORRECTED");
    Ok(())
}

/// Rising friction roar with random air crackles.
pub(super) fn reentry<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
) -> Result<(), ShowError> {
    seq.play_hz(80.0, 0.5)?;
    seq.set_led(Led::Red, true);
    seq.pause(300)?;

    for intensity in 0..100u32 {
        let x = intensity as f32;
        let heat = x * 4.0;

        if seq.chance() > 0.7 {
            let crackle = seq.scatter_range(1000..=3000);
            seq.play_hz(crackle as f32, 0.3)?;
            seq.pause(20)?;
        }

        let main = 250.0 + heat + (x * 0.5).sin() * 50.0;
        seq.set_duty(5000.0 + (((x * 0.7).sin() + (x * 1.9).sin()) * 10000.0).trunc());
        seq.play_hz(main, 0.4)?;

        seq.set_led(Led::Red, intensity % 3 == 0);
        let flicker = seq.chance() > 0.8;
        seq.set_led(Led::Green, flicker);
        seq.pause(20)?;
    }

    seq.status("CRITICAL HEATING");
    Ok(())
}
