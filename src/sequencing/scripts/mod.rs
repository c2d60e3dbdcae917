//! Per-phase scripts.
//!
//! Table-driven phases live in `tables` as `PhaseDescriptor`s; the rest are
//! short routines whose constants are literal tuning values.

mod detonation;
mod flight;
pub mod tables;

use log::debug;

use super::{
    error::ShowError,
    monitor::ShowMonitor,
    phase::{PhaseDescriptor, PhaseId},
    sequencer::PhaseSequencer,
};
use crate::hardware::Hardware;

/// The step table for a table-driven phase.
pub fn descriptor(phase: PhaseId) -> Option<&'static PhaseDescriptor> {
    match phase {
        PhaseId::SystemInit => Some(&tables::SYSTEM_INIT),
        PhaseId::Countdown => Some(&tables::COUNTDOWN),
        PhaseId::TerminalGuidance => Some(&tables::TERMINAL_GUIDANCE),
        PhaseId::Finale => Some(&tables::FINALE),
        _ => None,
    }
}

/// Run one phase's body (no cleanup, no inter-phase pause).
pub fn run<H: Hardware, M: ShowMonitor>(
    seq: &mut PhaseSequencer<H, M>,
    phase: PhaseId,
) -> Result<(), ShowError> {
    if let Some(table) = descriptor(phase) {
        debug!("{}: {} steps, {}ms", phase, table.steps.len(), table.duration_ms());
        return seq.run_steps(table.steps);
    }

    match phase {
        PhaseId::EngineStart => flight::engine_start(seq),
        PhaseId::Launch => flight::launch(seq),
        PhaseId::Boost => flight::boost(seq),
        PhaseId::Midcourse => flight::midcourse(seq),
        PhaseId::Reentry => flight::reentry(seq),
        PhaseId::Detonation => detonation::detonation(seq),
        PhaseId::PostDetonation => detonation::post_detonation(seq),
        // Table-driven; handled above.
        PhaseId::SystemInit | PhaseId::Countdown | PhaseId::TerminalGuidance | PhaseId::Finale => Ok(()),
    }
}
