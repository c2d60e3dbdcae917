//! Benchmarks for whole phases and the full show on a virtual clock.

use criterion::{BenchmarkId, Criterion};
use piezo_fx::{hardware::RecordingHardware, PhaseId, PhaseSequencer, ShowConfig};

pub fn bench_show(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/show");
    group.sample_size(20);

    for phase in [PhaseId::Launch, PhaseId::Detonation] {
        group.bench_with_input(BenchmarkId::new("phase", phase), &phase, |b, &phase| {
            b.iter(|| {
                let mut seq = PhaseSequencer::new(RecordingHardware::new(), ShowConfig::default());
                seq.run_phase(phase)
            })
        });
    }

    group.bench_function("full_show", |b| {
        b.iter(|| {
            let mut seq = PhaseSequencer::new(RecordingHardware::new(), ShowConfig::default());
            seq.run_full()
        })
    });

    group.finish();
}
