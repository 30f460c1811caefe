//! Dense LU factorization with partial pivoting.
//!
//! [`LuSolver`] owns a square coefficient matrix and factorizes it lazily the
//! first time a right-hand side is solved. The factorization overwrites the
//! matrix in place with the packed factors:
//!
//! - strictly below the logical diagonal: the multipliers of `L` (unit
//!   diagonal implied),
//! - on and above the logical diagonal: `U`.
//!
//! Rows are never moved in storage. Pivoting only permutes the
//! [`Permutation`] vector, and every later access goes through it, so that
//! `P·A = L·U` where row `i` of `P·A` is row `p[i]` of `A`.
//!
//! # State
//!
//! The solver is either `Unfactored` (it still owns the original
//! coefficients) or `Factored` (it owns the packed factors and the
//! permutation). Nothing transitions back: once factored, every solve reuses
//! the same factors. A factorization that hits a singular pivot leaves the
//! solver `Singular`, and every later call reports the same error.
//!
//! # Example
//!
//! ```
//! use nalgebra::{DMatrix, DVector};
//! use numex_linalg::LuSolver;
//!
//! let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
//! let mut solver = LuSolver::new(a).unwrap();
//!
//! let mut b = DVector::from_vec(vec![1.0, 2.0]);
//! solver.solve_in_place(&mut b).unwrap();
//! assert_eq!(b.as_slice(), &[2.0, 1.0]);
//! ```

use crate::permutation::Permutation;
use crate::permuted::{PermutedRows, PermutedRowsMut};
use crate::substitution::{backward_substitute, forward_substitute, unpermute};
use nalgebra::{DMatrix, DVector};
use numex_core::config::{default_solver_config, SolverConfig};
use numex_core::error::{LinalgError, LinalgResult};
use numex_core::types::Scalar;

/// Packed LU factors together with the pivot permutation.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors<T: Scalar> {
    lu: DMatrix<T>,
    permutation: Permutation,
}

impl<T: Scalar> LuFactors<T> {
    /// Dimension `n` of the factored `n×n` system.
    pub fn dim(&self) -> usize {
        self.permutation.len()
    }

    /// Pivot permutation: logical row `i` lives in storage row `p[i]`.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Packed factors in storage (unpermuted) row order.
    pub fn packed(&self) -> &DMatrix<T> {
        &self.lu
    }

    /// Packed factors seen in pivot order.
    pub fn view(&self) -> PermutedRows<'_, T> {
        PermutedRows::new(&self.lu, self.permutation.as_slice())
    }

    /// Unit lower triangular factor `L`, in pivot order.
    pub fn lower(&self) -> DMatrix<T> {
        let view = self.view();
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                T::one()
            } else if j < i {
                view[(i, j)]
            } else {
                T::zero()
            }
        })
    }

    /// Upper triangular factor `U`, in pivot order.
    pub fn upper(&self) -> DMatrix<T> {
        let view = self.view();
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| if j >= i { view[(i, j)] } else { T::zero() })
    }

    /// Determinant of the original matrix, `sign(P) · Π U[i, i]`.
    pub fn determinant(&self) -> T {
        let view = self.view();
        (0..self.dim()).fold(self.permutation.sign::<T>(), |det, i| det * view[(i, i)])
    }

    /// Solve `A·x = b` in place, overwriting `rhs` with `x`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `rhs` does not have `n` entries.
    pub fn solve_in_place(&self, rhs: &mut DVector<T>) -> LinalgResult<()> {
        if rhs.len() != self.dim() {
            return Err(LinalgError::dimension_mismatch(self.dim(), rhs.len()));
        }
        self.solve_slice(rhs.as_mut_slice());
        Ok(())
    }

    /// Solve every column of `rhs` in place.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `rhs` does not have `n` rows.
    pub fn solve_columns(&self, rhs: &mut DMatrix<T>) -> LinalgResult<()> {
        let n = self.dim();
        if rhs.nrows() != n {
            return Err(LinalgError::dimension_mismatch(
                format!("{} rows", n),
                format!("{} rows", rhs.nrows()),
            ));
        }
        if n == 0 {
            return Ok(());
        }
        // Column-major storage: each chunk of `n` values is one column
        for column in rhs.as_mut_slice().chunks_exact_mut(n) {
            self.solve_slice(column);
        }
        Ok(())
    }

    fn solve_slice(&self, rhs: &mut [T]) {
        log::trace!("substituting {}-entry right-hand side", rhs.len());
        let view = self.view();
        forward_substitute(view, rhs);
        backward_substitute(view, rhs);
        unpermute(self.permutation.as_slice(), rhs);
    }
}

/// Gaussian elimination with partial pivoting, in place.
///
/// `matrix` must be square and `permutation` the identity of the same size.
fn eliminate<T: Scalar>(
    matrix: &mut DMatrix<T>,
    permutation: &mut Permutation,
    config: &SolverConfig,
) -> LinalgResult<()> {
    let n = matrix.nrows();

    for ii in 0..n {
        // The last column has a single candidate, so only its pivot check remains
        let mut best = ii;
        for kk in (ii + 1)..n {
            let candidate = matrix[(permutation.row(kk), ii)];
            let current = matrix[(permutation.row(best), ii)];
            if config.pivot_strategy.prefers(candidate, current) {
                best = kk;
            }
        }
        permutation.swap(ii, best);

        let pivot = matrix[(permutation.row(ii), ii)];
        if config.is_singular_pivot(pivot) {
            log::warn!(
                "singular pivot {:e} in column {} of {}x{} matrix",
                pivot,
                ii,
                n,
                n
            );
            return Err(LinalgError::singular_pivot(ii, Scalar::to_f64(pivot)));
        }

        let mut view = PermutedRowsMut::new(matrix, permutation.as_slice());
        for jj in (ii + 1)..n {
            let multiplier = view[(jj, ii)] / pivot;
            view[(jj, ii)] = multiplier;
            view.sub_scaled_row(jj, ii, multiplier, ii + 1);
        }
    }

    log::debug!(
        "factorized {}x{} matrix with {} row swaps",
        n,
        n,
        permutation.swap_count()
    );
    Ok(())
}

/// Factorize `matrix` eagerly, consuming it.
///
/// # Errors
///
/// Returns `NotSquare` for rectangular input and `SingularPivot` if a pivot
/// fails the configured tolerance.
pub fn lu_factorize<T: Scalar>(
    mut matrix: DMatrix<T>,
    config: &SolverConfig,
) -> LinalgResult<LuFactors<T>> {
    if !matrix.is_square() {
        return Err(LinalgError::not_square(matrix.nrows(), matrix.ncols()));
    }
    let mut permutation = Permutation::identity(matrix.nrows());
    eliminate(&mut matrix, &mut permutation, config)?;
    Ok(LuFactors {
        lu: matrix,
        permutation,
    })
}

/// Solve `A·x = b` with a one-off factorization under the default configuration.
pub fn lu_solve<T: Scalar>(a: &DMatrix<T>, b: &DVector<T>) -> LinalgResult<DVector<T>> {
    LuSolver::new(a.clone())?.solve(b)
}

#[derive(Debug, Clone)]
enum LuState<T: Scalar> {
    Unfactored(DMatrix<T>),
    Factored(LuFactors<T>),
    Singular(LinalgError),
}

/// Dense linear solver with a lazily computed, reusable LU factorization.
#[derive(Debug, Clone)]
pub struct LuSolver<T: Scalar> {
    state: LuState<T>,
    dim: usize,
    config: SolverConfig,
}

impl<T: Scalar> LuSolver<T> {
    /// Take ownership of a square coefficient matrix, using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotSquare` if `rows != cols`.
    pub fn new(matrix: DMatrix<T>) -> LinalgResult<Self> {
        Self::with_config(matrix, default_solver_config().clone())
    }

    /// Take ownership of a square coefficient matrix with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotSquare` if `rows != cols`.
    pub fn with_config(matrix: DMatrix<T>, config: SolverConfig) -> LinalgResult<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::not_square(matrix.nrows(), matrix.ncols()));
        }
        Ok(Self {
            dim: matrix.nrows(),
            state: LuState::Unfactored(matrix),
            config,
        })
    }

    /// Dimension `n` of the `n×n` system.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The configuration this solver factorizes with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns true once the stored matrix has been replaced by its factors.
    pub fn is_factorized(&self) -> bool {
        matches!(self.state, LuState::Factored(_))
    }

    /// The factors, if the solver has been factorized successfully.
    pub fn factors(&self) -> Option<&LuFactors<T>> {
        match &self.state {
            LuState::Factored(factors) => Some(factors),
            _ => None,
        }
    }

    /// Factorize the stored matrix in place.
    ///
    /// Does nothing if the solver is already factored.
    ///
    /// # Errors
    ///
    /// Returns `SingularPivot` if a pivot fails the configured tolerance; the
    /// solver then stays singular and keeps returning that error.
    pub fn factorize(&mut self) -> LinalgResult<()> {
        self.factorized().map(|_| ())
    }

    /// Solve `A·x = b` in place, factorizing first if needed.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `rhs` does not have `n` entries, or the
    /// factorization error.
    pub fn solve_in_place(&mut self, rhs: &mut DVector<T>) -> LinalgResult<()> {
        if rhs.len() != self.dim {
            return Err(LinalgError::dimension_mismatch(self.dim, rhs.len()));
        }
        self.factorized()?.solve_in_place(rhs)
    }

    /// Solve `A·x = b`, returning `x` and leaving `b` untouched.
    pub fn solve(&mut self, rhs: &DVector<T>) -> LinalgResult<DVector<T>> {
        let mut x = rhs.clone();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Solve `A·X = B` column by column, overwriting `rhs` with `X`.
    pub fn solve_columns(&mut self, rhs: &mut DMatrix<T>) -> LinalgResult<()> {
        if rhs.nrows() != self.dim {
            return Err(LinalgError::dimension_mismatch(
                format!("{} rows", self.dim),
                format!("{} rows", rhs.nrows()),
            ));
        }
        self.factorized()?.solve_columns(rhs)
    }

    /// Consume the solver and return its factors, factorizing first if needed.
    pub fn into_factors(self) -> LinalgResult<LuFactors<T>> {
        match self.state {
            LuState::Unfactored(matrix) => lu_factorize(matrix, &self.config),
            LuState::Factored(factors) => Ok(factors),
            LuState::Singular(err) => Err(err),
        }
    }

    fn factorized(&mut self) -> LinalgResult<&LuFactors<T>> {
        if let LuState::Unfactored(matrix) = &mut self.state {
            let mut permutation = Permutation::identity(self.dim);
            self.state = match eliminate(matrix, &mut permutation, &self.config) {
                Ok(()) => LuState::Factored(LuFactors {
                    lu: std::mem::replace(matrix, DMatrix::zeros(0, 0)),
                    permutation,
                }),
                Err(err) => LuState::Singular(err),
            };
        }

        match &self.state {
            LuState::Factored(factors) => Ok(factors),
            LuState::Singular(err) => Err(err.clone()),
            LuState::Unfactored(_) => unreachable!("elimination leaves the solver factored or singular"),
        }
    }
}
