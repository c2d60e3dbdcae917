//! Monitor state, rebuilt on the UI thread from hardware messages and show events.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use piezo_fx::{hardware::HardwareMessage, sequencing::ShowEvent, Led, PhaseId, ShowOutcome, PWM_RANGE};

/// Lines kept in the status log pane
const LOG_CAPACITY: usize = 200;

pub struct MonitorState {
    /// `Some` when only one phase was requested
    pub single_phase: Option<PhaseId>,
    pub phase: Option<PhaseId>,
    /// Phases started so far
    pub phases_started: usize,
    pub frequency_hz: u32,
    pub duty: u16,
    pub leds: [bool; 2],
    pub pwm_released: bool,
    pub outcome: Option<ShowOutcome>,
    pub abort_requested: bool,
    pub log: VecDeque<String>,
    started: Instant,
    finished_after: Option<Duration>,
}

impl MonitorState {
    pub fn new(single_phase: Option<PhaseId>) -> Self {
        Self {
            single_phase,
            phase: None,
            phases_started: 0,
            frequency_hz: 0,
            duty: 0,
            leds: [false; 2],
            pwm_released: false,
            outcome: None,
            abort_requested: false,
            log: VecDeque::with_capacity(LOG_CAPACITY),
            started: Instant::now(),
            finished_after: None,
        }
    }

    pub fn apply_message(&mut self, message: HardwareMessage) {
        match message {
            HardwareMessage::Frequency(hz) => self.frequency_hz = hz,
            HardwareMessage::Duty(level) => self.duty = level,
            HardwareMessage::Deinit => self.pwm_released = true,
            HardwareMessage::Led { led, on } => self.leds[led.index()] = on,
            HardwareMessage::Toggle(led) => self.leds[led.index()] = !self.leds[led.index()],
        }
    }

    pub fn apply_event(&mut self, event: ShowEvent) {
        match event {
            ShowEvent::PhaseStarted(phase) => {
                self.phase = Some(phase);
                self.phases_started += 1;
                self.push_log(format!("[{}/{}] {}", self.phases_started, self.total_phases(), phase.banner()));
            }
            ShowEvent::Status(line) => self.push_log(line),
            ShowEvent::PhaseFinished(_) => {}
            ShowEvent::Finished(outcome) => {
                self.outcome = Some(outcome);
                self.finished_after = Some(self.started.elapsed());
                match outcome {
                    ShowOutcome::Completed => self.push_log("SEQUENCE COMPLETE".to_string()),
                    ShowOutcome::Interrupted { phase } => {
                        self.push_log(format!("SEQUENCE INTERRUPTED during {}", phase))
                    }
                }
            }
            ShowEvent::CleanedUp => self.push_log("Cleanup: buzzer off, LEDs off, PWM released".to_string()),
        }
    }

    pub fn total_phases(&self) -> usize {
        match self.single_phase {
            Some(_) => 1,
            None => PhaseId::FULL_SHOW.len(),
        }
    }

    pub fn led(&self, led: Led) -> bool {
        self.leds[led.index()]
    }

    /// Whether the piezo is currently making sound
    pub fn is_sounding(&self) -> bool {
        !self.pwm_released && self.duty > 0
    }

    /// Duty as a percentage of the PWM range
    pub fn duty_percent(&self) -> f32 {
        self.duty as f32 * 100.0 / PWM_RANGE as f32
    }

    /// Wall-clock time since start, frozen once the show finishes
    pub fn elapsed(&self) -> Duration {
        self.finished_after.unwrap_or_else(|| self.started.elapsed())
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_track_device_state() {
        let mut state = MonitorState::new(None);
        state.apply_message(HardwareMessage::Frequency(880));
        state.apply_message(HardwareMessage::Duty(15_000));
        state.apply_message(HardwareMessage::Led { led: Led::Red, on: true });
        state.apply_message(HardwareMessage::Toggle(Led::Green));
        assert_eq!(state.frequency_hz, 880);
        assert!(state.is_sounding());
        assert!(state.led(Led::Red));
        assert!(state.led(Led::Green));

        state.apply_message(HardwareMessage::Deinit);
        assert!(!state.is_sounding());
    }

    #[test]
    fn test_events_fill_the_log() {
        let mut state = MonitorState::new(Some(PhaseId::Launch));
        state.apply_event(ShowEvent::PhaseStarted(PhaseId::Launch));
        state.apply_event(ShowEvent::Status("VEHICLE IN FLIGHT".into()));
        state.apply_event(ShowEvent::Finished(ShowOutcome::Completed));

        assert_eq!(state.phase, Some(PhaseId::Launch));
        assert_eq!(state.log[0], "[1/1] LIFTOFF");
        assert_eq!(state.log[1], "VEHICLE IN FLIGHT");
        assert_eq!(state.outcome, Some(ShowOutcome::Completed));
    }

    #[test]
    fn test_log_is_bounded() {
        let mut state = MonitorState::new(None);
        for i in 0..LOG_CAPACITY + 5 {
            state.apply_event(ShowEvent::Status(i.to_string()));
        }
        assert_eq!(state.log.len(), LOG_CAPACITY);
        assert_eq!(state.log[0], "5");
    }

    #[test]
    fn test_elapsed_freezes_when_finished() {
        let mut state = MonitorState::new(None);
        state.apply_event(ShowEvent::Finished(ShowOutcome::Completed));
        let frozen = state.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(state.elapsed(), frozen);
    }
}
