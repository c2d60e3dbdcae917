mod show;
mod synth;

pub use show::bench_show;
pub use synth::bench_synth;
