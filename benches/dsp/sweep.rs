//! Benchmarks for sweep step generation (no noise, no hardware).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use piezo_fx::dsp::{sweep::ease, SweepSpec};

use crate::SWEEP_LENGTHS_MS;

pub fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/sweep");

    for &ms in SWEEP_LENGTHS_MS {
        let linear = SweepSpec::linear(400.0, 800.0, ms);
        group.bench_with_input(BenchmarkId::new("linear", ms), &linear, |b, spec| {
            b.iter(|| black_box(spec).steps().map(|s| s.frequency_hz).sum::<f32>())
        });

        let curved = SweepSpec::new(200.0, 500.0, ms, 1.5);
        group.bench_with_input(BenchmarkId::new("curved", ms), &curved, |b, spec| {
            b.iter(|| black_box(spec).steps().map(|s| s.frequency_hz).sum::<f32>())
        });
    }

    group.bench_function("ease", |b| b.iter(|| ease(black_box(0.37), black_box(0.7))));

    group.finish();
}
