//! Terminal monitor for the simulated device
//!
//! Shows the LEDs, the current tone and the buzzer output while the show
//! thread runs. Quitting early triggers the abort signal; the UI stays up
//! until the show has cleaned up.

mod panels;
mod spectrum;
mod state;
mod status;
mod waveform;

use std::{thread::JoinHandle, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use piezo_fx::{hardware::HardwareMessage, sequencing::ShowEvent, AbortSignal};

pub use state::MonitorState;

use panels::{render_leds, render_log};
use spectrum::{render_spectrum, ToneSpectrum};
use status::render_status;
use waveform::render_waveform;

/// Samples kept for the scope and the FFT
const SCOPE_BUFFER: usize = 2048;
/// Samples drawn in the scope after triggering
const SCOPE_WINDOW: usize = 512;

pub struct UiApp {
    hw_rx: Consumer<HardwareMessage>,
    event_rx: Consumer<ShowEvent>,
    scope_rx: Consumer<f32>,
    abort: AbortSignal,
    state: MonitorState,
    scope: Vec<f32>,
    spectrum: ToneSpectrum,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        hw_rx: Consumer<HardwareMessage>,
        event_rx: Consumer<ShowEvent>,
        scope_rx: Consumer<f32>,
        abort: AbortSignal,
        state: MonitorState,
        sample_rate: f32,
    ) -> Self {
        Self {
            hw_rx,
            event_rx,
            scope_rx,
            abort,
            state,
            scope: vec![0.0; SCOPE_BUFFER],
            spectrum: ToneSpectrum::new(SCOPE_BUFFER, sample_rate),
            should_quit: false,
        }
    }

    /// Run the UI event loop until the user quits after the show has finished
    pub fn run<T>(&mut self, terminal: &mut DefaultTerminal, show: &JoinHandle<T>) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_show();
            self.poll_scope();

            terminal.draw(|frame| self.render(frame))?;

            // An abort only ends the UI once the show has cleaned up
            if self.state.abort_requested && show.is_finished() {
                self.poll_show();
                break;
            }

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers, show.is_finished());
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_show(&mut self) {
        while let Ok(message) = self.hw_rx.pop() {
            self.state.apply_message(message);
        }
        while let Ok(event) = self.event_rx.pop() {
            self.state.apply_event(event);
        }
    }

    /// Keep the newest SCOPE_BUFFER samples
    fn poll_scope(&mut self) {
        let before = self.scope.len();
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() == before {
            return;
        }
        if self.scope.len() > SCOPE_BUFFER {
            let excess = self.scope.len() - SCOPE_BUFFER;
            self.scope.drain(..excess);
        }
        self.spectrum.update(&self.scope);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers, show_finished: bool) {
        let quit = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        };
        if !quit {
            return;
        }

        if show_finished {
            self.should_quit = true;
        } else if !self.state.abort_requested {
            self.abort.trigger();
            self.state.abort_requested = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(6),     // LEDs + log
                Constraint::Length(10), // Scope + spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        render_status(frame, rows[0], &self.state);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(20)])
            .split(rows[1]);
        render_leds(frame, middle[0], &self.state);
        render_log(frame, middle[1], &self.state);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        render_waveform(frame, bottom[0], &self.scope, SCOPE_WINDOW);
        render_spectrum(frame, bottom[1], &self.spectrum);

        let help = match (self.state.outcome, self.state.abort_requested) {
            (Some(_), _) => " Show finished. [Q] Quit",
            (None, true) => " Aborting, waiting for cleanup...",
            (None, false) => " [Q/Esc/Ctrl+C] Abort",
        };
        let help = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
