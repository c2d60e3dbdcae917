use super::phase::PhaseId;

/// Errors that can end a show run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowError {
    /// The abort signal was observed while `phase` was running
    Interrupted { phase: PhaseId },
    /// A phase selector outside 1..=6
    UnknownPhase(u8),
    /// The sequencer already released the hardware
    AlreadyCleanedUp,
}

impl std::fmt::Display for ShowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowError::Interrupted { phase } => {
                write!(f, "Show interrupted during phase '{}'", phase.name())
            }
            ShowError::UnknownPhase(selector) => {
                write!(f, "Unknown phase selector {} (expected 1-6)", selector)
            }
            ShowError::AlreadyCleanedUp => {
                write!(f, "Hardware already released; create a new sequencer to run again")
            }
        }
    }
}

impl std::error::Error for ShowError {}
