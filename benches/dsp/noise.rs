//! Benchmarks for the Brownian LCG.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use piezo_fx::dsp::BrownianNoise;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    let mut noise = BrownianNoise::default();
    group.bench_function("next_seed", |b| b.iter(|| black_box(noise.next_seed())));

    for &amount in &[0.0f32, 0.1, 0.5] {
        let mut noise = BrownianNoise::default();
        group.bench_with_input(BenchmarkId::new("sample", amount), &amount, |b, &amount| {
            b.iter(|| noise.sample(black_box(amount)))
        });
    }

    group.finish();
}
