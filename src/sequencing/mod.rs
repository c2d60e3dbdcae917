//! The scripted show.
//!
//! A show is a fixed, ordered list of phases. Each phase is a bounded loop
//! that asks the `ToneSynthesizer` for samples, writes them and an LED
//! pattern to the `Hardware`, and sleeps. There is no branching between
//! phases; the only non-linear control is an abort, after which cleanup runs.

pub mod abort;
pub mod config;
pub mod error;
pub mod monitor;
pub mod phase;
pub mod scripts;
pub mod sequencer;

pub use abort::AbortSignal;
pub use config::ShowConfig;
pub use error::ShowError;
pub use monitor::{ShowEvent, ShowMonitor};
pub use phase::{LedAction, PhaseDescriptor, PhaseId, ShowStep};
pub use sequencer::{PhaseSequencer, ShowOutcome};
