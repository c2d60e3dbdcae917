#[cfg(feature = "rtrb")]
use rtrb::Producer;

use super::{phase::PhaseId, sequencer::ShowOutcome};

/// Progress reported by the sequencer alongside its log lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowEvent {
    PhaseStarted(PhaseId),
    /// A console status line (countdown numbers, pulse counters, ...)
    Status(String),
    PhaseFinished(PhaseId),
    Finished(ShowOutcome),
    CleanedUp,
}

/// Receives `ShowEvent`s. Must not block the show.
pub trait ShowMonitor {
    fn on_event(&mut self, event: ShowEvent);
}

/// No monitoring; log lines only.
impl ShowMonitor for () {
    fn on_event(&mut self, _event: ShowEvent) {}
}

impl<M: ShowMonitor + ?Sized> ShowMonitor for &mut M {
    fn on_event(&mut self, event: ShowEvent) {
        (**self).on_event(event)
    }
}

impl ShowMonitor for Vec<ShowEvent> {
    fn on_event(&mut self, event: ShowEvent) {
        self.push(event);
    }
}

#[cfg(feature = "rtrb")]
impl ShowMonitor for Producer<ShowEvent> {
    fn on_event(&mut self, event: ShowEvent) {
        let _ = self.push(event);
    }
}
