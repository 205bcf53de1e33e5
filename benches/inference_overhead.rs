/// Inference Overhead Benchmarks
///
/// Measures histogram construction and full offset inference for typical
/// per-address transaction caps (10, 100, 1000, 10000 timestamps).
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use satzone::histogram::HOURS_PER_DAY;
use satzone::{infer_from_histogram, infer_time_zone_offset, ActivityHistogram, TransactionTimestamp};
use std::time::Duration;

/// Deterministic timestamps spread over ~3 months with a quiet 05:00-11:00 UTC window
fn synthetic_timestamps(n: usize) -> Vec<TransactionTimestamp> {
    let mut out = Vec::with_capacity(n);
    let mut secs: i64 = 1_704_067_200;
    while out.len() < n {
        secs += 7_919; // prime step so minutes and hours drift
        let hour = (secs / 3_600).rem_euclid(24);
        if !(5..11).contains(&hour) {
            if let Ok(ts) = TransactionTimestamp::from_unix(secs) {
                out.push(ts);
            }
        }
    }
    out
}

/// Benchmark: end-to-end inference from timestamps
fn bench_infer_from_timestamps(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_time_zone_offset");
    group.measurement_time(Duration::from_secs(5));

    for n in [10usize, 100, 1_000, 10_000] {
        let stamps = synthetic_timestamps(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &stamps, |b, stamps| {
            b.iter(|| black_box(infer_time_zone_offset(black_box(stamps))));
        });
    }

    group.finish();
}

/// Benchmark: histogram binning only
fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("activity_histogram");
    group.measurement_time(Duration::from_secs(5));

    let stamps = synthetic_timestamps(10_000);
    group.throughput(Throughput::Elements(stamps.len() as u64));
    group.bench_function("bin_10000", |b| {
        b.iter(|| black_box(ActivityHistogram::from_timestamps(black_box(&stamps))));
    });

    group.finish();
}

/// Benchmark: posterior over 25 offsets (constant cost)
fn bench_posterior(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset_posterior");
    group.measurement_time(Duration::from_secs(5));

    let mut counts = [7u64; HOURS_PER_DAY];
    counts[3] = 0;
    counts[17] = 40;
    let histogram = ActivityHistogram::from_counts(counts);
    group.bench_function("posterior_25_offsets", |b| {
        b.iter(|| black_box(infer_from_histogram(black_box(histogram))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_infer_from_timestamps,
    bench_histogram,
    bench_posterior
);
criterion_main!(benches);
