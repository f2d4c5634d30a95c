//! Criterion benchmarks for u-transport.
//!
//! Uses random balanced instances (supply and demand derived from a random
//! integer flow matrix) with a fixed seed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_transport::ibfs::Heuristic;
use u_transport::problem::TransportProblem;
use u_transport::transport::{OptimizerConfig, TransportOptimizer};

fn random_problem(m: usize, n: usize, seed: u64) -> TransportProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let costs: Vec<Vec<f64>> = (0..m)
        .map(|_| (0..n).map(|_| rng.random_range(1..50) as f64).collect())
        .collect();
    let flows: Vec<Vec<f64>> = (0..m)
        .map(|_| (0..n).map(|_| rng.random_range(0..20) as f64).collect())
        .collect();
    let supply = flows.iter().map(|row| row.iter().sum()).collect();
    let demand = (0..n)
        .map(|j| flows.iter().map(|row| row[j]).sum())
        .collect();
    TransportProblem::new(costs, supply, demand).unwrap()
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibfs");

    for &size in &[10, 50, 100] {
        let problem = random_problem(size, size, 42);
        for heuristic in Heuristic::ALL {
            group.bench_with_input(
                BenchmarkId::new(heuristic.name(), size),
                &problem,
                |b, p| b.iter(|| black_box(heuristic.build(black_box(p)))),
            );
        }
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    let optimizer = TransportOptimizer::default();
    for &size in &[5, 10, 20] {
        let problem = random_problem(size, size, 7);
        for heuristic in [Heuristic::NorthwestCorner, Heuristic::Vogel] {
            group.bench_with_input(
                BenchmarkId::new(heuristic.name(), size),
                &problem,
                |b, p| {
                    b.iter(|| {
                        let solution = optimizer.solve(black_box(p), heuristic).unwrap();
                        black_box(solution)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_batch");
    group.sample_size(10);

    let problems: Vec<TransportProblem> = (0..16).map(|s| random_problem(8, 8, s)).collect();
    for parallel in [false, true] {
        let optimizer =
            TransportOptimizer::new(OptimizerConfig::default().with_parallel(parallel)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(if parallel { "parallel" } else { "sequential" }),
            &problems,
            |b, ps| b.iter(|| black_box(optimizer.solve_batch(black_box(ps), Heuristic::MinimumCost))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_heuristics, bench_solve, bench_batch);
criterion_main!(benches);
