//! Criterion benchmarks for the TSP solvers.
//!
//! Uses seeded random Euclidean instances so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_tsp::brute_force::{BruteForceConfig, BruteForceRunner};
use u_tsp::held_karp::{HeldKarpConfig, HeldKarpRunner, Objective};
use u_tsp::matrix::random;
use u_tsp::nearest_neighbor::{NnConfig, NnRunner};
use u_tsp::two_opt::{InitialTour, TwoOptConfig, TwoOptRunner};

fn bench_held_karp(c: &mut Criterion) {
    let mut group = c.benchmark_group("held_karp");
    group.sample_size(10);
    for n in [8usize, 12, 14, 16] {
        let m = random::euclidean(n, 42).unwrap();
        let config = HeldKarpConfig::default();
        group.bench_with_input(BenchmarkId::new("total_cost", n), &m, |b, m| {
            b.iter(|| HeldKarpRunner::run(black_box(m), &config).unwrap())
        });
        let cost_only = HeldKarpConfig::default().with_reconstruct_tour(false);
        group.bench_with_input(BenchmarkId::new("cost_only", n), &m, |b, m| {
            b.iter(|| HeldKarpRunner::run(black_box(m), &cost_only).unwrap())
        });
        let bottleneck = HeldKarpConfig::default().with_objective(Objective::Bottleneck);
        group.bench_with_input(BenchmarkId::new("bottleneck", n), &m, |b, m| {
            b.iter(|| HeldKarpRunner::run(black_box(m), &bottleneck).unwrap())
        });
    }
    group.finish();
}

fn bench_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_force");
    group.sample_size(10);
    for n in [6usize, 8, 9] {
        let m = random::euclidean(n, 42).unwrap();
        let config = BruteForceConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &m, |b, m| {
            b.iter(|| BruteForceRunner::run(black_box(m), &config).unwrap())
        });
    }
    group.finish();
}

fn bench_nearest_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");
    for n in [50usize, 200] {
        let m = random::euclidean(n, 42).unwrap();
        let config = NnConfig::default().with_multi_start(true);
        group.bench_with_input(BenchmarkId::new("multi_start", n), &m, |b, m| {
            b.iter(|| NnRunner::run(black_box(m), &config).unwrap())
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");
    group.sample_size(20);
    for n in [50usize, 200] {
        let m = random::euclidean(n, 42).unwrap();
        let shuffled = TwoOptConfig::default().with_seed(42);
        group.bench_with_input(BenchmarkId::new("shuffled", n), &m, |b, m| {
            b.iter(|| TwoOptRunner::run(black_box(m), &shuffled).unwrap())
        });
        let greedy = TwoOptConfig::default().with_initial_tour(InitialTour::NearestNeighbor);
        group.bench_with_input(BenchmarkId::new("nearest_neighbor", n), &m, |b, m| {
            b.iter(|| TwoOptRunner::run(black_box(m), &greedy).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_held_karp,
    bench_brute_force,
    bench_nearest_neighbor,
    bench_two_opt
);
criterion_main!(benches);
