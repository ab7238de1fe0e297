//! Criterion benchmarks for sim_engine.
//!
//! Benchmarks cover:
//! - RNG throughput (single draws vs batch fill)
//! - π estimation, sequential vs parallel
//! - GBM path generation, sequential vs parallel
//! - Terminal price statistics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_engine::{gbm, pi, stats, SimRng, SimulationParameters};

fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_samples", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = SimRng::from_seed(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += rng.gen_normal();
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = SimRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

fn bench_pi_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pi_estimation");

    for n_points in [10_000u64, 100_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::new("sequential", n_points),
            &n_points,
            |b, &n| {
                let mut rng = SimRng::from_seed(42);
                b.iter(|| black_box(pi::estimate_pi(n, &mut rng)))
            },
        );

        group.bench_with_input(BenchmarkId::new("parallel", n_points), &n_points, |b, &n| {
            b.iter(|| black_box(pi::estimate_pi_parallel(n, 42)))
        });
    }

    group.finish();
}

fn bench_gbm_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("gbm_paths");
    group.sample_size(20);

    for n_paths in [100, 1_000, 10_000] {
        let params = SimulationParameters::builder()
            .path_count(n_paths)
            .step_count(252)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", n_paths), &params, |b, params| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| black_box(gbm::simulate(params, &mut rng)))
        });

        group.bench_with_input(BenchmarkId::new("parallel", n_paths), &params, |b, params| {
            b.iter(|| black_box(gbm::simulate_parallel(params, 42)))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let params = SimulationParameters::builder()
        .path_count(10_000)
        .step_count(252)
        .build()
        .unwrap();
    let paths = gbm::simulate_parallel(&params, 42).unwrap();

    c.bench_function("summarize_10k_paths", |b| {
        b.iter(|| black_box(stats::summarize(&paths, &params)))
    });
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_pi_estimation,
    bench_gbm_paths,
    bench_statistics
);
criterion_main!(benches);
