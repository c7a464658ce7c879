use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spo2_core::processing::{BeatSpO2Estimator, Calibration, EstimatorBank, SpO2Estimator};
use spo2_core::simulation::{PpgSignalGenerator, SimulationConfig};
use spo2_core::PpgSample;

const WINDOW_SIZES: &[usize] = &[50, 100, 200, 500, 1000];
const SENSOR_COUNTS: &[usize] = &[1, 4, 16, 64];

fn synthetic_samples(count: usize) -> Vec<PpgSample> {
    let config = SimulationConfig {
        seed: Some(42),
        ..Default::default()
    };
    PpgSignalGenerator::new(config)
        .expect("valid simulation config")
        .take(count)
        .collect()
}

fn benchmark_windowed_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowed_estimator");
    let samples = synthetic_samples(4096);

    for &window in WINDOW_SIZES {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("add", window), &window, |b, &window| {
            let mut estimator = SpO2Estimator::new(window).unwrap();
            let mut i = 0;
            b.iter(|| {
                let sample = samples[i % samples.len()];
                estimator.add(black_box(sample.red), black_box(sample.ir));
                i += 1;
            });
        });

        group.bench_with_input(BenchmarkId::new("estimate", window), &window, |b, &window| {
            let mut estimator = SpO2Estimator::new(window).unwrap();
            for sample in samples.iter().take(window) {
                estimator.add(sample.red, sample.ir);
            }
            b.iter(|| black_box(estimator.estimate()));
        });
    }

    group.finish();
}

fn benchmark_beat_estimator(c: &mut Criterion) {
    let samples = synthetic_samples(4096);

    c.bench_function("beat_estimator_add", |b| {
        let mut estimator = BeatSpO2Estimator::new();
        let mut i = 0;
        b.iter(|| {
            let sample = samples[i % samples.len()];
            estimator.add(black_box(sample.red), black_box(sample.ir));
            i += 1;
        });
    });
}

fn benchmark_estimator_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator_bank");
    let samples = synthetic_samples(256);

    for &sensors in SENSOR_COUNTS {
        group.throughput(Throughput::Elements(sensors as u64));
        group.bench_with_input(BenchmarkId::new("estimate_all", sensors), &sensors, |b, &sensors| {
            let mut bank = EstimatorBank::windowed(sensors, 200, Calibration::default()).unwrap();
            for sample in &samples {
                bank.add_frame(&vec![*sample; sensors]).unwrap();
            }
            b.iter(|| black_box(bank.estimate_all()));
        });
    }

    group.finish();
}

fn benchmark_generator(c: &mut Criterion) {
    c.bench_function("generator_next_sample", |b| {
        let config = SimulationConfig {
            seed: Some(7),
            ..Default::default()
        };
        let mut generator = PpgSignalGenerator::new(config).unwrap();
        b.iter(|| black_box(generator.next_sample()));
    });
}

criterion_group!(
    benches,
    benchmark_windowed_estimator,
    benchmark_beat_estimator,
    benchmark_estimator_bank,
    benchmark_generator
);
criterion_main!(benches);
