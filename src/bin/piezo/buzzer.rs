//! Virtual piezo: renders the PWM output as an audible square wave.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::{Consumer, Producer};

use piezo_fx::{hardware::HardwareMessage, PWM_RANGE};

/// Peak-to-peak output is kept well under full scale; a raw square is loud.
const AMPLITUDE: f32 = 0.25;
/// Frames rendered per inner block
const BLOCK_FRAMES: usize = 256;

/*
PWM as audio

The device drives the piezo with a square wave at the PWM frequency whose
high time is `duty / 65535` of each period. We render exactly that, with
the high and low levels shifted so the wave has no DC offset:

    high = A * (1 - d)
    low  = -A * d

Duty 0 (or a released channel) is silence. Frequency writes keep the phase
accumulator running so pitch changes are click-free.
*/

pub struct Buzzer {
    rx: Consumer<HardwareMessage>,
    scope: Producer<f32>,
    sample_rate: f32,
    frequency_hz: f32,
    /// Fraction of the period spent high, 0..=1
    duty: f32,
    phase: f32,
}

impl Buzzer {
    pub fn new(rx: Consumer<HardwareMessage>, scope: Producer<f32>, sample_rate: f32) -> Self {
        Self {
            rx,
            scope,
            sample_rate,
            frequency_hz: 0.0,
            duty: 0.0,
            phase: 0.0,
        }
    }

    /// Apply every pending hardware write.
    fn poll(&mut self) {
        while let Ok(message) = self.rx.pop() {
            match message {
                HardwareMessage::Frequency(hz) => self.frequency_hz = hz as f32,
                HardwareMessage::Duty(level) => self.duty = level as f32 / PWM_RANGE as f32,
                HardwareMessage::Deinit => {
                    self.duty = 0.0;
                    self.frequency_hz = 0.0;
                }
                HardwareMessage::Led { .. } | HardwareMessage::Toggle(_) => {}
            }
        }
    }

    /// Fill `out` with mono samples; also feeds the scope ring.
    pub fn render(&mut self, out: &mut [f32]) {
        self.poll();

        let silent = self.duty <= 0.0 || self.frequency_hz <= 0.0;
        let increment = self.frequency_hz / self.sample_rate;
        for sample in out.iter_mut() {
            *sample = if silent {
                0.0
            } else if self.phase < self.duty {
                AMPLITUDE * (1.0 - self.duty)
            } else {
                -AMPLITUDE * self.duty
            };

            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }

            // Scope is best-effort
            let _ = self.scope.push(*sample);
        }
    }
}

/// Open the default output device and start rendering.
///
/// Returns the running stream (keep it alive) and its sample rate.
pub fn start(rx: Consumer<HardwareMessage>, scope: Producer<f32>) -> EyreResult<(cpal::Stream, f32)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let mut buzzer = Buzzer::new(rx, scope, sample_rate);
    let mut mono = vec![0.0f32; BLOCK_FRAMES];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for chunk in data.chunks_mut(BLOCK_FRAMES * channels) {
                    let frames = chunk.len() / channels;
                    let block = &mut mono[..frames];
                    buzzer.render(block);

                    // Mono to all channels
                    for (frame, &s) in chunk.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(s);
                    }
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    Ok((stream, sample_rate))
}
