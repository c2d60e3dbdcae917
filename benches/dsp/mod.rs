mod envelope;
mod noise;
mod sweep;

pub use envelope::bench_envelope;
pub use noise::bench_noise;
pub use sweep::bench_sweep;
