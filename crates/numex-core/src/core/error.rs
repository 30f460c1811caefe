//! Error types for dense linear algebra and ODE model operations.
//!
//! This module defines the error types shared by the solver and the
//! epidemic model crates.

use thiserror::Error;

/// Errors that can occur while factorizing or solving a dense system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Matrix handed to the solver is not square.
    ///
    /// LU factorization is only defined here for `n×n` systems.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows of the offending matrix
        rows: usize,
        /// Number of columns of the offending matrix
        cols: usize,
    },

    /// Dimension mismatch between operands.
    ///
    /// This error occurs when a right-hand side or a product operand does
    /// not conform to the matrix it is combined with.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// The selected pivot is too small to divide by.
    ///
    /// Raised when `|pivot|` is at or below the configured pivot tolerance.
    #[error("Singular pivot in column {column}: |{pivot:e}| is at or below the pivot tolerance")]
    SingularPivot {
        /// Elimination column (logical pivot row) where the pivot failed
        column: usize,
        /// Value of the rejected pivot
        pivot: f64,
    },
}

impl LinalgError {
    /// Create a NotSquare error.
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a SingularPivot error.
    pub fn singular_pivot(column: usize, pivot: f64) -> Self {
        Self::SingularPivot { column, pivot }
    }
}

/// Errors that can occur while building or integrating a dynamical model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A model or integrator parameter is out of range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the parameter
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The integrated state stopped being finite.
    #[error("State became non-finite at t = {time}")]
    NonFinite {
        /// Time at which the non-finite state was produced
        time: f64,
    },

    /// Propagated linear algebra error.
    #[error("Linear algebra operation failed: {0}")]
    Linalg(#[from] LinalgError),
}

impl ModelError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S1, S2>(name: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonFinite error.
    pub fn non_finite(time: f64) -> Self {
        Self::NonFinite { time }
    }
}

/// Result type alias for linear algebra operations.
pub type LinalgResult<T> = std::result::Result<T, LinalgError>;

/// Result type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
