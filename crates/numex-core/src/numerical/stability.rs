//! Numerical stability helpers shared by the solvers and integrators.

use crate::types::Scalar;
use nalgebra::{Dim, Matrix, RawStorage};
use num_traits::Float;

/// Check if a matrix or vector is finite (no NaN or Inf values).
pub fn is_finite_matrix<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> bool
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    matrix.iter().all(|x| <T as Float>::is_finite(*x))
}

/// Largest absolute entry of a matrix or vector, zero when empty.
pub fn max_abs<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> T
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    matrix
        .iter()
        .fold(T::zero(), |acc, x| <T as Float>::max(acc, <T as Float>::abs(*x)))
}

/// Ratio `numerator / denominator` where the denominator is floored at machine epsilon.
///
/// Used for relative errors, where a zero reference would otherwise divide by zero.
pub fn relative_ratio<T: Scalar>(numerator: T, denominator: T) -> T {
    numerator / <T as Float>::max(<T as Float>::abs(denominator), T::EPSILON)
}

/// Relative distance between two values, `|a - b| / max(|b|, eps)`.
pub fn relative_error<T: Scalar>(a: T, b: T) -> T {
    relative_ratio(<T as Float>::abs(a - b), b)
}
