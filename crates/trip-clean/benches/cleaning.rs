//! Benchmarks for trajectory repair.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trip_clean::{repair_samples, Cleaner, RawTable};
use trip_core::{Region, Sample, Schema};

const KEYPOINTS: [&str; 7] = ["nose", "head", "neck", "leftear", "rightear", "body", "tailbase"];

fn create_test_samples(n_frames: usize, phase: f64) -> Vec<Sample> {
    (0..n_frames)
        .map(|i| {
            let t = i as f64 * 0.05 + phase;
            // Every seventh frame drops below the threshold
            let confidence = if i % 7 == 3 { 0.4 } else { 0.99 };
            Sample::new(660.0 + 200.0 * t.cos(), 490.0 + 150.0 * t.sin(), confidence)
        })
        .collect()
}

fn benchmark_repair(c: &mut Criterion) {
    let samples = create_test_samples(18_000, 0.0);

    c.bench_function("repair_18000_frames", |b| {
        b.iter(|| repair_samples(black_box(&samples), 0.95))
    });
}

fn benchmark_clean_session(c: &mut Criterion) {
    let schema = Schema::new(
        KEYPOINTS.iter().map(|s| s.to_string()).collect(),
        30.0,
        0.95,
        Region::new(475.0, 305.0, 845.0, 680.0),
    )
    .expect("schema must be valid");

    let keypoints: Vec<Vec<Sample>> = (0..KEYPOINTS.len())
        .map(|k| create_test_samples(18_000, k as f64 * 0.1))
        .collect();
    let table = RawTable::from_samples(&keypoints).expect("table must build");
    let cleaner = Cleaner::from_schema(&schema);

    c.bench_function("clean_7_keypoints_18000_frames", |b| {
        b.iter(|| cleaner.clean(black_box(&table), &schema))
    });
}

criterion_group!(benches, benchmark_repair, benchmark_clean_session);
criterion_main!(benches);
