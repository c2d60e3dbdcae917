#[cfg(feature = "rtrb")]
use rtrb::Producer;

use std::time::{Duration, Instant};

use super::{Hardware, Led};

/// A hardware write, as seen by a simulator front end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HardwareMessage {
    Frequency(u32),
    Duty(u16),
    Deinit,
    Led { led: Led, on: bool },
    Toggle(Led),
}

pub trait MessageSink {
    /// Deliver a message. Must not block; a full sink drops the message.
    fn send(&mut self, message: HardwareMessage);
}

#[cfg(feature = "rtrb")]
impl MessageSink for Producer<HardwareMessage> {
    fn send(&mut self, message: HardwareMessage) {
        // Dropping on overflow keeps the show on time.
        let _ = self.push(message);
    }
}

impl MessageSink for Vec<HardwareMessage> {
    fn send(&mut self, message: HardwareMessage) {
        self.push(message);
    }
}

/// Fan out to two sinks (e.g. audio thread and UI thread).
impl<A: MessageSink, B: MessageSink> MessageSink for (A, B) {
    fn send(&mut self, message: HardwareMessage) {
        self.0.send(message);
        self.1.send(message);
    }
}

/// Real-time `Hardware` that forwards every write to a `MessageSink`.
///
/// Sleeps block the calling thread; the clock is `Instant`-based.
pub struct ForwardingHardware<S: MessageSink> {
    sink: S,
    origin: Instant,
}

impl<S: MessageSink> ForwardingHardware<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            origin: Instant::now(),
        }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: MessageSink> Hardware for ForwardingHardware<S> {
    fn set_pwm_frequency(&mut self, hz: u32) {
        self.sink.send(HardwareMessage::Frequency(hz));
    }

    fn set_pwm_duty(&mut self, level: u16) {
        self.sink.send(HardwareMessage::Duty(level));
    }

    fn deinit_pwm(&mut self) {
        self.sink.send(HardwareMessage::Deinit);
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.sink.send(HardwareMessage::Led { led, on });
    }

    fn toggle_led(&mut self, led: Led) {
        self.sink.send(HardwareMessage::Toggle(led));
    }

    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_writes_in_order() {
        let mut hw = ForwardingHardware::new(Vec::new());
        hw.set_pwm_frequency(880);
        hw.set_pwm_duty(2_000);
        hw.set_led(Led::Green, true);
        hw.toggle_led(Led::Red);
        hw.deinit_pwm();

        assert_eq!(
            hw.into_sink(),
            vec![
                HardwareMessage::Frequency(880),
                HardwareMessage::Duty(2_000),
                HardwareMessage::Led { led: Led::Green, on: true },
                HardwareMessage::Toggle(Led::Red),
                HardwareMessage::Deinit,
            ]
        );
    }

    #[test]
    fn test_fan_out_reaches_both_sinks() {
        let mut hw = ForwardingHardware::new((Vec::new(), Vec::new()));
        hw.set_pwm_duty(0);
        let (a, b) = hw.into_sink();
        assert_eq!(a, vec![HardwareMessage::Duty(0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut hw = ForwardingHardware::new(Vec::new());
        let t0 = hw.now_ms();
        hw.sleep_ms(2);
        assert!(hw.now_ms() >= t0 + 2);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn test_full_ring_drops_instead_of_blocking() {
        let (producer, mut consumer) = rtrb::RingBuffer::new(2);
        let mut hw = ForwardingHardware::new(producer);
        hw.set_pwm_frequency(100);
        hw.set_pwm_frequency(200);
        hw.set_pwm_frequency(300);
        assert_eq!(consumer.pop().ok(), Some(HardwareMessage::Frequency(100)));
        assert_eq!(consumer.pop().ok(), Some(HardwareMessage::Frequency(200)));
        assert!(consumer.pop().is_err());
    }
}
