//! Step tables for the phases that are pure data.

use crate::sequencing::phase::{
    LedAction::{Off, On, Toggle},
    PhaseDescriptor, PhaseId, ShowStep,
};

/// Five green blinks with a low system hum.
pub static SYSTEM_INIT: PhaseDescriptor = PhaseDescriptor {
    id: PhaseId::SystemInit,
    steps: &[
        ShowStep::tone(100.0, 0.01).green(On).hold(100),
        ShowStep::silence().green(Off).hold(100),
        ShowStep::tone(100.0, 0.01).green(On).hold(100),
        ShowStep::silence().green(Off).hold(100),
        ShowStep::tone(100.0, 0.01).green(On).hold(100),
        ShowStep::silence().green(Off).hold(100),
        ShowStep::tone(100.0, 0.01).green(On).hold(100),
        ShowStep::silence().green(Off).hold(100),
        ShowStep::tone(100.0, 0.01).green(On).hold(100),
        ShowStep::silence().green(Off).hold(100),
    ],
};

pub static COUNTDOWN: PhaseDescriptor = PhaseDescriptor {
    id: PhaseId::Countdown,
    steps: &[
        ShowStep::lights().green(On),
        // Low systems hum with red blinks
        ShowStep::tone(180.0, 0.01).red(On).hold(500),
        ShowStep::silence().red(Off).hold(500),
        ShowStep::tone(180.0, 0.01).red(On).hold(500),
        ShowStep::silence().red(Off).hold(500),
        ShowStep::tone(180.0, 0.01).red(On).hold(500),
        ShowStep::silence().red(Off).hold(500),
        // Synthesized countdown voice: beep, then hum for the rest of the second
        ShowStep::tone(800.0, 0.01).red(On).green(Off).hold(300).status("T-7"),
        ShowStep::tone(150.0, 0.02).red(Off).green(On).hold(700),
        ShowStep::tone(900.0, 0.01).red(On).green(Off).hold(200).status("T-8"),
        ShowStep::tone(150.0, 0.02).red(Off).green(On).hold(800),
        ShowStep::tone(1000.0, 0.01).red(On).green(Off).hold(100).status("T-9"),
        ShowStep::tone(150.0, 0.02).red(Off).green(On).hold(900),
        ShowStep::tone(1200.0, 0.01).red(On).green(Off).hold(400).status("T-10"),
        ShowStep::tone(150.0, 0.02).red(Off).green(On).hold(600),
        // Final rapid beeps; green lights during the gaps
        ShowStep::tone(1200.0, 0.05).red(On).green(Off).hold(150),
        ShowStep::silence().red(On).green(On).hold(150),
        ShowStep::tone(1400.0, 0.05).red(On).green(Off).hold(150),
        ShowStep::silence().red(On).green(On).hold(150),
        ShowStep::tone(1600.0, 0.05).red(On).green(Off).hold(150),
        ShowStep::silence().red(On).green(On).hold(150),
        ShowStep::tone(2000.0, 0.05).red(On).green(Off).hold(150),
    ],
};

pub static TERMINAL_GUIDANCE: PhaseDescriptor = PhaseDescriptor {
    id: PhaseId::TerminalGuidance,
    steps: &[
        ShowStep::tone(600.0, 0.05).green(On).red(On).hold(400),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle),
        ShowStep::tone(1200.0, 0.01).hold(30),
        ShowStep::tone(600.0, 0.05).hold(70),
        ShowStep::lights().green(Toggle).status("TARGET ACQUIRED"),
    ],
};

/// Three closing beeps.
pub static FINALE: PhaseDescriptor = PhaseDescriptor {
    id: PhaseId::Finale,
    steps: &[
        ShowStep::tone(200.0, 0.01).red(On).hold(100),
        ShowStep::silence().red(Off).hold(100),
        ShowStep::tone(200.0, 0.01).red(On).hold(100),
        ShowStep::silence().red(Off).hold(100),
        ShowStep::tone(200.0, 0.01).red(On).hold(100),
        ShowStep::silence().red(Off).hold(100),
    ],
};
