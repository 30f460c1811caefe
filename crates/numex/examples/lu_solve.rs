//! Example: timing the hand-written LU solver on random systems.
//!
//! Factorizes a diagonally dominant random matrix, solves several
//! right-hand sides against the cached factors and compares the result with
//! nalgebra's own LU.
//!
//! Run with `RUST_LOG=debug` to see the factorization log.

use numex::numex_core::numerical::max_abs;
use numex::numex_linalg::dense::random_system;
use numex::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

const SIZE: usize = 200;
const RIGHT_HAND_SIDES: usize = 5;

fn main() -> LinalgResult<()> {
    env_logger::init();
    println!("=== Dense LU with partial pivoting, n = {} ===\n", SIZE);

    let mut rng = SmallRng::seed_from_u64(2024);
    let (a, b) = random_system::<f64, _>(SIZE, &mut rng);

    let mut solver = LuSolver::new(a.clone())?;
    let start = Instant::now();
    solver.factorize()?;
    let factor_time = start.elapsed();

    let factors = solver.factors().expect("factorized above");
    println!("Factorization: {:?}", factor_time);
    println!("Row swaps:     {}", factors.permutation().swap_count());
    println!("Determinant:   {:e}", factors.determinant());

    let start = Instant::now();
    let mut worst = 0.0f64;
    for k in 0..RIGHT_HAND_SIDES {
        let rhs = b.map(|v| v * (k + 1) as f64);
        let x = solver.solve(&rhs)?;
        worst = worst.max(relative_residual(&a, &x, &rhs)?);
    }
    println!(
        "{} solves:      {:?} (worst relative residual {:e}, expected below {:e})",
        RIGHT_HAND_SIDES,
        start.elapsed(),
        worst,
        constants::residual_tolerance::<f64>()
    );

    let start = Instant::now();
    let reference = a.clone().lu().solve(&b);
    println!("nalgebra LU:   {:?}", start.elapsed());

    if let Some(reference) = reference {
        let ours = solver.solve(&b)?;
        println!("Max difference vs nalgebra: {:e}", max_abs(&(ours - reference)));
    }

    Ok(())
}
