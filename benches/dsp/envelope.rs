//! Benchmarks for the duty envelope and per-phase formulas.

use std::hint::black_box;

use criterion::Criterion;
use piezo_fx::dsp::envelope::{breathing_duty, doppler_factor, power_rise};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    group.bench_function("breathing_duty_1s", |b| {
        b.iter(|| (0..1_000u64).map(|ms| breathing_duty(black_box(ms)) as u32).sum::<u32>())
    });

    group.bench_function("doppler_factor", |b| {
        b.iter(|| doppler_factor(black_box(120.0), black_box(0.015)))
    });

    group.bench_function("power_rise", |b| {
        b.iter(|| power_rise(black_box(80.0), black_box(220.0), black_box(0.6), black_box(1.5)))
    });

    group.finish();
}
