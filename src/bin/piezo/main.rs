//! piezo - desktop simulator for the buzzer and LED launch show
//!
//! Run with: cargo run -- --phase launch

mod app;
mod buzzer;
mod ui;

use clap::Parser;
use color_eyre::eyre::Result as EyreResult;

use app::Piezo;
use piezo_fx::{sequencing::config::DEFAULT_SCATTER_SEED, PhaseId, ShowConfig, DEFAULT_NOISE_SEED};

#[derive(Parser, Debug)]
#[command(name = "piezo", version, about = "Piezo buzzer + LED launch show, simulated")]
struct Args {
    /// Run one phase: selector 1-6 or a phase name (default: full show)
    #[arg(short, long)]
    phase: Option<PhaseId>,

    /// Seed of the Brownian frequency noise
    #[arg(long, default_value_t = DEFAULT_NOISE_SEED)]
    seed: u32,

    /// Seed of the crackle/flicker scatter generator
    #[arg(long, default_value_t = DEFAULT_SCATTER_SEED)]
    scatter_seed: u64,

    /// Skip the gaps between phases
    #[arg(long)]
    no_pauses: bool,

    /// Log lines only, no terminal UI
    #[arg(long)]
    headless: bool,

    /// Don't open an audio output stream
    #[arg(long)]
    mute: bool,

    /// Run instantly on a virtual clock and print a summary
    #[arg(long)]
    dry_run: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Under the TUI only warnings get through, so log lines don't tear the screen
    let level = if args.headless || args.dry_run { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = ShowConfig::new()
        .noise_seed(args.seed)
        .scatter_seed(args.scatter_seed)
        .pauses(!args.no_pauses);

    let piezo = Piezo::new(config).phase(args.phase);
    if args.dry_run {
        return piezo.dry_run();
    }

    piezo.mute(args.mute).headless(args.headless).run()
}
