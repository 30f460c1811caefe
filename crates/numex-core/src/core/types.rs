//! Type definitions and aliases for the numerical exercises.
//!
//! This module provides the scalar trait used by every solver, the nalgebra
//! type aliases the workspace works with, and precision-dependent constants.

use nalgebra::{Const, Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display, LowerExp};

/// Trait for scalar types used by the solvers (f32 or f64).
///
/// This trait combines all the numeric traits the factorization and the
/// integrators need.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Relative residual a well-conditioned solve is expected to reach.
    const RESIDUAL_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for logging and error reporting).
    ///
    /// Returns NaN if the value cannot be represented.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }

    /// Convert from usize (for step counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const RESIDUAL_TOLERANCE: Self = 1e-4;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const RESIDUAL_TOLERANCE: Self = 1e-9;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a statically-sized matrix.
pub type SMatrix<T, const R: usize, const C: usize> = OMatrix<T, Const<R>, Const<C>>;

/// Type alias for a square matrix with static size.
pub type SSquareMatrix<T, const N: usize> = OMatrix<T, Const<N>, Const<N>>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Type alias for a statically-sized vector.
pub type SVector<T, const N: usize> = OVector<T, Const<N>>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get the expected relative residual of a well-conditioned solve.
    pub fn residual_tolerance<T: Scalar>() -> T {
        T::RESIDUAL_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_constants() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert!(<f64 as Scalar>::RESIDUAL_TOLERANCE < f64::from(<f32 as Scalar>::RESIDUAL_TOLERANCE));
        assert_eq!(constants::residual_tolerance::<f64>(), 1e-9);
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(<f64 as Scalar>::from_f64(0.25), 0.25);
        assert_eq!(<f32 as Scalar>::from_usize(7), 7.0);
        assert_eq!(Scalar::to_f64(1.5_f32), 1.5);
    }
}
