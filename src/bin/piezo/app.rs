//! Piezo - wires the show thread to the virtual buzzer and the monitor

use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::{info, warn};
use rtrb::RingBuffer;

use super::buzzer;
use super::ui::{MonitorState, UiApp};

use piezo_fx::{
    hardware::{ForwardingHardware, HardwareCall, HardwareMessage, RecordingHardware},
    sequencing::{ShowEvent, ShowMonitor},
    AbortSignal, Hardware, PhaseId, PhaseSequencer, ShowConfig, ShowError, ShowOutcome,
};

/// Hardware writes in flight between the show and each consumer
const MESSAGE_RING: usize = 4096;
const EVENT_RING: usize = 256;
/// Rendered buzzer samples for the scope (~170 ms at 48 kHz)
const SCOPE_RING: usize = 8192;
/// Sample rate assumed for the spectrum when no stream is open
const FALLBACK_SAMPLE_RATE: f32 = 48_000.0;

type ShowHandle = JoinHandle<Result<ShowOutcome, ShowError>>;

/// Main application builder
pub struct Piezo {
    config: ShowConfig,
    phase: Option<PhaseId>,
    mute: bool,
    headless: bool,
}

impl Piezo {
    pub fn new(config: ShowConfig) -> Self {
        Self {
            config,
            phase: None,
            mute: false,
            headless: false,
        }
    }

    /// Run a single phase instead of the full show
    pub fn phase(mut self, phase: Option<PhaseId>) -> Self {
        self.phase = phase;
        self
    }

    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Run the show in real time (takes over the terminal unless headless)
    pub fn run(self) -> EyreResult<()> {
        let abort = AbortSignal::new();

        let (audio_tx, audio_rx) = RingBuffer::<HardwareMessage>::new(MESSAGE_RING);
        let (ui_tx, ui_rx) = RingBuffer::<HardwareMessage>::new(MESSAGE_RING);
        let (event_tx, event_rx) = RingBuffer::<ShowEvent>::new(EVENT_RING);
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING);

        // The stream must outlive the show so the final silence is rendered
        let (_stream, sample_rate) = if self.mute {
            (None, FALLBACK_SAMPLE_RATE)
        } else {
            let (stream, rate) = buzzer::start(audio_rx, scope_tx)?;
            (Some(stream), rate)
        };

        let show = spawn_show(
            self.config,
            self.phase,
            ForwardingHardware::new((audio_tx, ui_tx)),
            event_tx,
            abort.clone(),
        )?;

        if self.headless {
            let handler_abort = abort.clone();
            ctrlc::set_handler(move || handler_abort.trigger())
                .wrap_err("failed to install Ctrl+C handler")?;

            let outcome = join_show(show)?;
            report(outcome);
        } else {
            let mut terminal = ratatui::init();
            let state = MonitorState::new(self.phase);
            let ui_result =
                UiApp::new(ui_rx, event_rx, scope_rx, abort.clone(), state, sample_rate).run(&mut terminal, &show);
            ratatui::restore();

            let outcome = finish_show(ui_result, &abort, show)?;
            report(outcome);
        }

        // Give the audio callback a moment to pick up the final silence
        thread::sleep(Duration::from_millis(50));
        Ok(())
    }

    /// Run against a virtual clock and print what the device would have done
    pub fn dry_run(self) -> EyreResult<()> {
        let mut seq = PhaseSequencer::new(RecordingHardware::new(), self.config).with_monitor(Vec::<ShowEvent>::new());
        let outcome = run_plan(&mut seq, self.phase)?;
        let (hw, events) = seq.into_parts();

        let calls = hw.calls();
        let count = |pred: fn(&HardwareCall) -> bool| calls.iter().filter(|c| pred(c)).count();
        let led_writes = count(|c| matches!(c, HardwareCall::SetLed(..) | HardwareCall::ToggleLed(_)));
        let tones = count(|c| matches!(c, HardwareCall::PwmFrequency(_)));
        let statuses = events.iter().filter(|e| matches!(e, ShowEvent::Status(_))).count();

        println!("=== piezo dry run ===");
        println!("Noise seed: {}", self.config.noise_seed);
        println!("Scatter seed: {}", self.config.scatter_seed);
        println!();
        for event in &events {
            if let ShowEvent::PhaseStarted(phase) = event {
                println!("  Phase: {} ({})", phase.banner(), phase);
            }
        }
        println!();
        println!("Outcome: {:?}", outcome);
        println!("Virtual duration: {:.3} s", hw.elapsed_ms() as f64 / 1000.0);
        println!("Hardware calls: {}", calls.len());
        println!("  frequency writes: {}", tones);
        println!("  LED writes: {}", led_writes);
        println!("Status lines: {}", statuses);
        println!("PWM released: {}", hw.is_released());
        Ok(())
    }
}

fn run_plan<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
    phase: Option<PhaseId>,
) -> Result<ShowOutcome, ShowError> {
    match phase {
        Some(phase) => seq.run_phase(phase),
        None => seq.run_full(),
    }
}

fn spawn_show<H, M>(
    config: ShowConfig,
    phase: Option<PhaseId>,
    hw: H,
    monitor: M,
    abort: AbortSignal,
) -> EyreResult<ShowHandle>
where
    H: Hardware + Send + 'static,
    M: ShowMonitor + Send + 'static,
{
    thread::Builder::new()
        .name("show".into())
        .spawn(move || {
            let mut seq = PhaseSequencer::new(hw, config)
                .with_monitor(monitor)
                .with_abort_signal(abort);
            run_plan(&mut seq, phase)
        })
        .wrap_err("failed to spawn show thread")
}

fn join_show(show: ShowHandle) -> EyreResult<ShowOutcome> {
    let outcome = show.join().map_err(|_| eyre!("show thread panicked"))??;
    Ok(outcome)
}

/// Join the show once the monitor exits. A failed monitor aborts the show
/// first, so cleanup still runs before the error is returned.
fn finish_show(ui_result: EyreResult<()>, abort: &AbortSignal, show: ShowHandle) -> EyreResult<ShowOutcome> {
    if let Err(err) = ui_result {
        abort.trigger();
        if let Err(show_err) = join_show(show) {
            warn!("show thread failed after monitor error: {}", show_err);
        }
        return Err(err);
    }
    join_show(show)
}

fn report(outcome: ShowOutcome) {
    match outcome {
        ShowOutcome::Completed => info!("Show complete"),
        ShowOutcome::Interrupted { phase } => info!("Show interrupted during {}", phase),
    }
}
