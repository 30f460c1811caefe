//! Dense matrix helpers around the hand-written solver.
//!
//! Storage, transposition and matrix products are nalgebra's; this module
//! only adds the conformance checks and the residual measures used to verify
//! a computed solution.

use nalgebra::{DMatrix, DVector};
use numex_core::error::{LinalgError, LinalgResult};
use numex_core::numerical::relative_ratio;
use numex_core::types::Scalar;
use rand::Rng;

/// Transpose of `matrix`.
pub fn transpose<T: Scalar>(matrix: &DMatrix<T>) -> DMatrix<T> {
    matrix.transpose()
}

/// Product `A·B`, checking that the inner dimensions agree.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `A.cols != B.rows`.
pub fn checked_mul<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> LinalgResult<DMatrix<T>> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::dimension_mismatch(
            format!("{} rows in right operand", a.ncols()),
            format!("{} rows", b.nrows()),
        ));
    }
    Ok(a * b)
}

/// Residual `A·x − b`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the operands do not conform.
pub fn residual<T: Scalar>(
    a: &DMatrix<T>,
    x: &DVector<T>,
    b: &DVector<T>,
) -> LinalgResult<DVector<T>> {
    if a.ncols() != x.len() {
        return Err(LinalgError::dimension_mismatch(a.ncols(), x.len()));
    }
    if a.nrows() != b.len() {
        return Err(LinalgError::dimension_mismatch(a.nrows(), b.len()));
    }
    Ok(a * x - b)
}

/// Relative residual `‖A·x − b‖ / max(‖b‖, ε)`.
pub fn relative_residual<T: Scalar>(
    a: &DMatrix<T>,
    x: &DVector<T>,
    b: &DVector<T>,
) -> LinalgResult<T> {
    let r = residual(a, x, b)?;
    Ok(relative_ratio(r.norm(), b.norm()))
}

/// Random strictly diagonally dominant `n×n` matrix.
///
/// Off-diagonal entries are uniform in `[-1, 1)`; each diagonal entry is
/// pushed past the absolute row sum, with a random sign, so the matrix is
/// nonsingular and well conditioned.
pub fn random_diagonally_dominant<T: Scalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> DMatrix<T> {
    let mut matrix = DMatrix::from_fn(n, n, |_, _| {
        <T as Scalar>::from_f64(rng.gen_range(-1.0..1.0))
    });
    for i in 0..n {
        let off_diagonal: f64 = (0..n)
            .filter(|&j| j != i)
            .map(|j| Scalar::to_f64(matrix[(i, j)]).abs())
            .sum();
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        matrix[(i, i)] = <T as Scalar>::from_f64(sign * (off_diagonal + 1.0));
    }
    matrix
}

/// Random well-conditioned system `(A, b)` of size `n`.
pub fn random_system<T: Scalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> (DMatrix<T>, DVector<T>) {
    let a = random_diagonally_dominant(n, rng);
    let b = DVector::from_fn(n, |_, _| <T as Scalar>::from_f64(rng.gen_range(-10.0..10.0)));
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_transpose() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = transpose(&a);
        assert_eq!((t.nrows(), t.ncols()), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t[(0, 1)], 4.0);
    }

    #[test]
    fn test_checked_mul() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = DMatrix::from_row_slice(3, 1, &[1.0, 0.0, -1.0]);
        let c = checked_mul(&a, &b).unwrap();
        assert_eq!(c, DMatrix::from_row_slice(2, 1, &[-2.0, -2.0]));

        assert!(matches!(
            checked_mul(&a, &a),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_relative_residual() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = DVector::from_vec(vec![4.0, 8.0]);
        let exact = DVector::from_vec(vec![2.0, 2.0]);
        assert_relative_eq!(relative_residual(&a, &exact, &b).unwrap(), 0.0);

        let off = DVector::from_vec(vec![2.0, 3.0]);
        // residual [0, 4], ‖b‖ = √80
        assert_relative_eq!(
            relative_residual(&a, &off, &b).unwrap(),
            4.0 / 80.0_f64.sqrt(),
            epsilon = 1e-12
        );

        let short = DVector::from_vec(vec![1.0]);
        assert!(residual(&a, &short, &b).is_err());
    }

    #[test]
    fn test_random_matrix_is_dominant() {
        let mut rng = SmallRng::seed_from_u64(7);
        let a: DMatrix<f64> = random_diagonally_dominant(6, &mut rng);
        for i in 0..6 {
            let off: f64 = (0..6).filter(|&j| j != i).map(|j| a[(i, j)].abs()).sum();
            assert!(a[(i, i)].abs() > off);
        }

        let (a, b): (DMatrix<f32>, DVector<f32>) = random_system(4, &mut rng);
        assert_eq!((a.nrows(), b.len()), (4, 4));
    }
}
