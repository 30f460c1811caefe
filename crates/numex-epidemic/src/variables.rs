//! State variables of the multi-city model.
//!
//! The state is a pair of `N×N` blocks. Entry `(i, j)` of the susceptible
//! block `S` counts residents of city `i` currently present in city `j`, and
//! likewise for the infectious block `I`. Stacked, they form the `2N×N`
//! matrix `[S; I]` the model is usually written with.

use crate::integrator::OdeState;
use nalgebra::DMatrix;
use numex_core::error::{LinalgError, LinalgResult};
use numex_core::numerical::is_finite_matrix;
use numex_core::types::{SSquareMatrix, SVector, Scalar};
use std::ops::{Add, Mul, Sub};

/// Susceptible and infectious counts for `N` cities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiCityVariables<T: Scalar, const N: usize> {
    s: SSquareMatrix<T, N>,
    i: SSquareMatrix<T, N>,
}

impl<T: Scalar, const N: usize> MultiCityVariables<T, N> {
    /// The number of cities.
    pub const CITIES: usize = N;

    /// Build from the two blocks.
    pub fn new(s: SSquareMatrix<T, N>, i: SSquareMatrix<T, N>) -> Self {
        Self { s, i }
    }

    /// Empty state.
    pub fn zeros() -> Self {
        Self::new(SSquareMatrix::zeros(), SSquareMatrix::zeros())
    }

    /// Everybody at home: `S = diag(susceptible)`, `I = diag(infectious)`.
    pub fn at_home(susceptible: &SVector<T, N>, infectious: &SVector<T, N>) -> Self {
        Self::new(
            SSquareMatrix::from_diagonal(susceptible),
            SSquareMatrix::from_diagonal(infectious),
        )
    }

    /// Susceptible block.
    pub fn s(&self) -> &SSquareMatrix<T, N> {
        &self.s
    }

    /// Mutable susceptible block.
    pub fn s_mut(&mut self) -> &mut SSquareMatrix<T, N> {
        &mut self.s
    }

    /// Infectious block.
    pub fn i(&self) -> &SSquareMatrix<T, N> {
        &self.i
    }

    /// Mutable infectious block.
    pub fn i_mut(&mut self) -> &mut SSquareMatrix<T, N> {
        &mut self.i
    }

    /// The `2N×N` matrix `[S; I]`.
    pub fn stacked(&self) -> DMatrix<T> {
        DMatrix::from_fn(2 * N, N, |row, col| {
            if row < N {
                self.s[(row, col)]
            } else {
                self.i[(row - N, col)]
            }
        })
    }

    /// Split a `2N×N` matrix `[S; I]` into its blocks.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `stacked` is not `2N×N`.
    pub fn from_stacked(stacked: &DMatrix<T>) -> LinalgResult<Self> {
        if stacked.shape() != (2 * N, N) {
            return Err(LinalgError::dimension_mismatch(
                format!("{}x{}", 2 * N, N),
                format!("{}x{}", stacked.nrows(), stacked.ncols()),
            ));
        }
        Ok(Self::new(
            SSquareMatrix::from_fn(|row, col| stacked[(row, col)]),
            SSquareMatrix::from_fn(|row, col| stacked[(row + N, col)]),
        ))
    }

    /// Everybody, everywhere.
    pub fn total_population(&self) -> T {
        self.s.sum() + self.i.sum()
    }

    /// Residents of `city`, wherever they currently are.
    pub fn resident_population(&self, city: usize) -> T {
        self.s.row(city).sum() + self.i.row(city).sum()
    }

    /// People currently in `city`, whatever their home.
    pub fn present_population(&self, city: usize) -> T {
        self.s.column(city).sum() + self.i.column(city).sum()
    }

    /// Total infectious count.
    pub fn total_infectious(&self) -> T {
        self.i.sum()
    }
}

impl<T: Scalar, const N: usize> Add for MultiCityVariables<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.s + rhs.s, self.i + rhs.i)
    }
}

impl<T: Scalar, const N: usize> Sub for MultiCityVariables<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.s - rhs.s, self.i - rhs.i)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for MultiCityVariables<T, N> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.s * factor, self.i * factor)
    }
}

impl<T: Scalar, const N: usize> OdeState<T> for MultiCityVariables<T, N> {
    fn is_finite(&self) -> bool {
        is_finite_matrix(&self.s) && is_finite_matrix(&self.i)
    }
}
