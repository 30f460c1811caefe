//! LU factorization benchmarks.
//!
//! Compares the hand-written elimination against nalgebra's LU on random
//! diagonally dominant systems, for factorization and for repeated solves
//! against a cached factorization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;
use numex_core::config::SolverConfig;
use numex_linalg::{dense::random_system, lu_factorize, LuSolver};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const SIZES: [usize; 4] = [8, 32, 128, 256];

fn bench_factorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorize");
    let mut rng = SmallRng::seed_from_u64(42);

    for &n in &SIZES {
        let (a, _) = random_system::<f64, _>(n, &mut rng);

        group.bench_with_input(BenchmarkId::new("numex", n), &a, |bench, a| {
            bench.iter(|| lu_factorize(black_box(a.clone()), &SolverConfig::default()))
        });

        group.bench_with_input(BenchmarkId::new("nalgebra", n), &a, |bench, a| {
            bench.iter(|| black_box(a.clone()).lu())
        });
    }

    group.finish();
}

fn bench_cached_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_solve");
    let mut rng = SmallRng::seed_from_u64(43);

    for &n in &SIZES {
        let (a, b) = random_system::<f64, _>(n, &mut rng);

        let mut solver = LuSolver::new(a.clone()).expect("square matrix");
        solver.factorize().expect("nonsingular matrix");
        group.bench_with_input(BenchmarkId::new("numex", n), &b, |bench, b| {
            bench.iter(|| {
                let mut x: DVector<f64> = b.clone();
                solver.solve_in_place(black_box(&mut x)).expect("solve");
                x
            })
        });

        let lu = a.lu();
        group.bench_with_input(BenchmarkId::new("nalgebra", n), &b, |bench, b| {
            bench.iter(|| lu.solve(black_box(b)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_factorize, bench_cached_solve);
criterion_main!(benches);
