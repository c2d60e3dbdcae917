#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::str::FromStr;

use crate::synth::Tone;

/// Every phase of the show, in running order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseId {
    SystemInit,
    Countdown,
    EngineStart,
    Launch,
    Boost,
    Midcourse,
    Reentry,
    TerminalGuidance,
    Detonation,
    PostDetonation,
    Finale,
}

impl PhaseId {
    /// The full show, top to bottom.
    pub const FULL_SHOW: [PhaseId; 11] = [
        PhaseId::SystemInit,
        PhaseId::Countdown,
        PhaseId::EngineStart,
        PhaseId::Launch,
        PhaseId::Boost,
        PhaseId::Midcourse,
        PhaseId::Reentry,
        PhaseId::TerminalGuidance,
        PhaseId::Detonation,
        PhaseId::PostDetonation,
        PhaseId::Finale,
    ];

    /// Phases that can be run on their own, indexed by selector 1..=6.
    pub const SELECTABLE: [PhaseId; 6] = [
        PhaseId::Countdown,
        PhaseId::EngineStart,
        PhaseId::Launch,
        PhaseId::Boost,
        PhaseId::Reentry,
        PhaseId::Detonation,
    ];

    pub fn from_selector(selector: u8) -> Option<PhaseId> {
        match selector {
            1..=6 => Some(Self::SELECTABLE[selector as usize - 1]),
            _ => None,
        }
    }

    pub fn selector(self) -> Option<u8> {
        Self::SELECTABLE
            .iter()
            .position(|&p| p == self)
            .map(|i| i as u8 + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            PhaseId::SystemInit => "system_init",
            PhaseId::Countdown => "countdown",
            PhaseId::EngineStart => "engine_start",
            PhaseId::Launch => "launch",
            PhaseId::Boost => "boost",
            PhaseId::Midcourse => "midcourse",
            PhaseId::Reentry => "reentry",
            PhaseId::TerminalGuidance => "terminal_guidance",
            PhaseId::Detonation => "detonation",
            PhaseId::PostDetonation => "post_detonation",
            PhaseId::Finale => "finale",
        }
    }

    /// Console line printed when the phase starts.
    pub fn banner(self) -> &'static str {
        match self {
            PhaseId::SystemInit => "SYSTEM INITIALIZATION",
            PhaseId::Countdown => "LAUNCH COUNTDOWN",
            PhaseId::EngineStart => "ROCKET ENGINE IGNITION",
            PhaseId::Launch => "LIFTOFF",
            PhaseId::Boost => "BOOST PHASE",
            PhaseId::Midcourse => "MIDCOURSE CORRECTION",
            PhaseId::Reentry => "ATMOSPHERIC REENTRY",
            PhaseId::TerminalGuidance => "TERMINAL GUIDANCE",
            PhaseId::Detonation => "DETONATION SEQUENCE",
            PhaseId::PostDetonation => "FIRESTORM",
            PhaseId::Finale => "SIMULATION COMPLETE",
        }
    }

    /// Pause after this phase in the full show (ms).
    pub fn pause_after_ms(self) -> u32 {
        match self {
            PhaseId::SystemInit => 0,
            PhaseId::Countdown => 500,
            PhaseId::EngineStart => 300,
            PhaseId::Launch => 500,
            PhaseId::Boost => 300,
            PhaseId::Midcourse => 500,
            PhaseId::Reentry => 200,
            PhaseId::TerminalGuidance => 300,
            PhaseId::Detonation => 1_000,
            PhaseId::PostDetonation => 0,
            PhaseId::Finale => 0,
        }
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a selector digit ("3") or a phase name ("launch").
impl FromStr for PhaseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(selector) = s.parse::<u8>() {
            return PhaseId::from_selector(selector)
                .ok_or_else(|| format!("phase selector must be 1-6, got {}", selector));
        }
        let wanted = s.trim().to_lowercase().replace('-', "_");
        PhaseId::FULL_SHOW
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("unknown phase '{}'", s))
    }
}

/// What a table step does to one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedAction {
    Keep,
    On,
    Off,
    Toggle,
}

/// One timed step of a table-driven phase.
///
/// Executed as: optional status line, tone, LEDs, then hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowStep {
    /// `None` leaves the current tone playing.
    pub tone: Option<Tone>,
    pub noise: f32,
    pub red: LedAction,
    pub green: LedAction,
    pub hold_ms: u32,
    pub status: Option<&'static str>,
}

impl ShowStep {
    const EMPTY: ShowStep = ShowStep {
        tone: None,
        noise: 0.0,
        red: LedAction::Keep,
        green: LedAction::Keep,
        hold_ms: 0,
        status: None,
    };

    pub const fn tone(hz: f32, noise: f32) -> Self {
        let mut step = Self::EMPTY;
        step.tone = Some(Tone::Hz(hz));
        step.noise = noise;
        step
    }

    pub const fn silence() -> Self {
        let mut step = Self::EMPTY;
        step.tone = Some(Tone::Silent);
        step
    }

    /// A step that only touches LEDs (and/or holds).
    pub const fn lights() -> Self {
        Self::EMPTY
    }

    pub const fn red(mut self, action: LedAction) -> Self {
        self.red = action;
        self
    }

    pub const fn green(mut self, action: LedAction) -> Self {
        self.green = action;
        self
    }

    pub const fn hold(mut self, ms: u32) -> Self {
        self.hold_ms = ms;
        self
    }

    pub const fn status(mut self, line: &'static str) -> Self {
        self.status = Some(line);
        self
    }
}

/// A phase that is pure data: a name and an ordered list of steps.
#[derive(Debug, Clone, Copy)]
pub struct PhaseDescriptor {
    pub id: PhaseId,
    pub steps: &'static [ShowStep],
}

impl PhaseDescriptor {
    /// Sum of all holds (ms).
    pub fn duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.hold_ms as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_mapping() {
        assert_eq!(PhaseId::from_selector(1), Some(PhaseId::Countdown));
        assert_eq!(PhaseId::from_selector(2), Some(PhaseId::EngineStart));
        assert_eq!(PhaseId::from_selector(3), Some(PhaseId::Launch));
        assert_eq!(PhaseId::from_selector(4), Some(PhaseId::Boost));
        assert_eq!(PhaseId::from_selector(5), Some(PhaseId::Reentry));
        assert_eq!(PhaseId::from_selector(6), Some(PhaseId::Detonation));
        assert_eq!(PhaseId::from_selector(0), None);
        assert_eq!(PhaseId::from_selector(7), None);
    }

    #[test]
    fn test_selector_roundtrip() {
        for n in 1..=6u8 {
            assert_eq!(PhaseId::from_selector(n).and_then(PhaseId::selector), Some(n));
        }
        assert_eq!(PhaseId::Midcourse.selector(), None);
    }

    #[test]
    fn test_parse_names_and_digits() {
        assert_eq!("4".parse::<PhaseId>(), Ok(PhaseId::Boost));
        assert_eq!("terminal-guidance".parse::<PhaseId>(), Ok(PhaseId::TerminalGuidance));
        assert_eq!("Launch".parse::<PhaseId>(), Ok(PhaseId::Launch));
        assert!("9".parse::<PhaseId>().is_err());
        assert!("warp".parse::<PhaseId>().is_err());
    }

    #[test]
    fn test_full_show_order_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for phase in PhaseId::FULL_SHOW {
            assert!(seen.insert(phase));
        }
        assert_eq!(PhaseId::FULL_SHOW[0], PhaseId::SystemInit);
        assert_eq!(PhaseId::FULL_SHOW[10], PhaseId::Finale);
    }

    #[test]
    fn test_step_builder() {
        const STEP: ShowStep = ShowStep::tone(180.0, 0.01).red(LedAction::On).hold(500);
        assert_eq!(STEP.tone, Some(Tone::Hz(180.0)));
        assert_eq!(STEP.red, LedAction::On);
        assert_eq!(STEP.green, LedAction::Keep);
        assert_eq!(STEP.hold_ms, 500);
        assert_eq!(ShowStep::silence().tone, Some(Tone::Silent));
        assert_eq!(ShowStep::lights().tone, None);
    }
}
