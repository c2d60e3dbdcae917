//! Benchmarks for shaped sweeps through the synthesizer.

use std::convert::Infallible;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use piezo_fx::{dsp::SweepSpec, Tone, ToneSynthesizer};

use crate::SWEEP_LENGTHS_MS;

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/synth");

    let mut synth = ToneSynthesizer::default();
    group.bench_function("shape", |b| {
        b.iter(|| synth.shape(black_box(Tone::Hz(440.0)), black_box(0.1), black_box(1_234)))
    });

    for &ms in SWEEP_LENGTHS_MS {
        let spec = SweepSpec::new(2000.0, 800.0, ms, 0.7);
        let mut synth = ToneSynthesizer::default();
        group.bench_with_input(BenchmarkId::new("sweep", ms), &spec, |b, spec| {
            b.iter(|| {
                let mut duty_sum = 0u64;
                let _ = synth.sweep(spec, 0, |sample, _, _| {
                    duty_sum += sample.duty_cycle as u64;
                    Ok::<(), Infallible>(())
                });
                black_box(duty_sum)
            })
        });
    }

    let mut synth = ToneSynthesizer::default();
    group.bench_function("harmonics_100ms", |b| {
        b.iter(|| {
            let mut last = 0u32;
            let _ = synth.harmonics(220.0, &[1.0, 0.5, 0.25], 100, 0, |sample, _, _| {
                last = sample.pwm_frequency();
                Ok::<(), Infallible>(())
            });
            black_box(last)
        })
    });

    group.finish();
}
