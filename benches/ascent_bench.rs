//! Criterion benchmarks for discrete-gradient ascent.
//!
//! Uses seeded random packing problems (positive objective weights,
//! non-negative constraint rows) so both strategies do real work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_discrete_ascent::ascent::{AscentConfig, AscentRunner, GradientStrategy};
use u_discrete_ascent::expr::evaluate;
use u_discrete_ascent::model::{Bindings, Model};

// ===========================================================================
// Random packing: maximize sum(w_i x_i) s.t. sum(a_ji x_i) <= b_j
// ===========================================================================

fn linear(coefficients: &[i64]) -> String {
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c}*x{i}"))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn packing_model(n: usize, m: usize, seed: u64) -> Model {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = Model::new(format!("packing_n{n}_m{m}"));

    for i in 0..n {
        model.integer_var(format!("x{i}"), 0);
    }

    let weights: Vec<i64> = (0..n).map(|_| rng.random_range(1..=20)).collect();
    model.maximize(linear(&weights));

    for _ in 0..m {
        let row: Vec<i64> = (0..n).map(|_| rng.random_range(1..=10)).collect();
        let rhs: i64 = rng.random_range(50..=200);
        model.add_constraint(format!("{} <= {rhs}", linear(&row)));
    }

    model
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_coordinate_wise(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_wise");
    group.sample_size(10);

    for &(n, m) in &[(5usize, 3usize), (20, 5), (50, 10)] {
        let model = packing_model(n, m, 42);
        let config = AscentConfig::default();
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_m{m}"), n),
            &(model, config),
            |b, (model, config)| {
                b.iter(|| {
                    let mut fresh = model.clone();
                    let report = AscentRunner::run(black_box(&mut fresh), black_box(config));
                    black_box(report)
                })
            },
        );
    }
    group.finish();
}

fn bench_combinatorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinatorial_neighbor");
    group.sample_size(10);

    for &n in &[2usize, 4, 6] {
        let model = packing_model(n, 2, 42);
        let config = AscentConfig::default().with_strategy(GradientStrategy::CombinatorialNeighbor);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(model, config),
            |b, (model, config)| {
                b.iter(|| {
                    let mut fresh = model.clone();
                    let report = AscentRunner::run(black_box(&mut fresh), black_box(config));
                    black_box(report)
                })
            },
        );
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let bindings: Bindings = (0..30)
        .map(|i| (format!("x{i}"), rng.random_range(0..100i64)))
        .collect();
    let coefficients: Vec<i64> = (0..30).map(|_| rng.random_range(1..=9)).collect();
    let constraint = format!("{} <= 100000", linear(&coefficients));

    c.bench_function("evaluate_constraint_30_vars", |b| {
        b.iter(|| {
            let value = evaluate(black_box(&constraint), black_box(&bindings));
            black_box(value)
        })
    });
}

criterion_group!(benches, bench_coordinate_wise, bench_combinatorial, bench_evaluate);
criterion_main!(benches);
