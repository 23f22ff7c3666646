use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cooperpace::{calculator, pace, threshold};

/// Performance benchmarks for the pace calculation pipeline
///
/// Every evaluation is constant time; these guard against accidental
/// allocation-heavy changes in formatting.

fn bench_threshold(c: &mut Criterion) {
    c.bench_function("threshold_pace", |b| {
        b.iter(|| threshold::threshold_pace(black_box(3200.0)))
    });
}

fn bench_calculate_paces(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pace Calculation");

    for &count in &[1usize, 100, 5000] {
        let distances: Vec<f64> = (0..count)
            .map(|i| 1000.0 + (i as f64 * 5000.0) / count as f64)
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("calculate_paces", count),
            &distances,
            |b, distances| {
                b.iter(|| {
                    for &distance in distances {
                        let _ = black_box(calculator::calculate_paces(distance));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("format_pace", |b| b.iter(|| pace::format_pace(black_box(4.758))));
    c.bench_function("interval_splits", |b| {
        b.iter(|| pace::interval_splits(black_box(3.4), &pace::INTERVAL_DISTANCES))
    });
}

criterion_group!(benches, bench_threshold, bench_calculate_paces, bench_formatting);
criterion_main!(benches);
