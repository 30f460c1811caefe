//! Numex linear algebra - dense LU factorization written out by hand.
//!
//! This crate implements Gaussian elimination with partial pivoting on top
//! of nalgebra's dense storage. Matrix products and transposition are left
//! to nalgebra; the factorization, the pivot bookkeeping and the triangular
//! substitutions are done here.
//!
//! # Example
//!
//! ```
//! use nalgebra::{DMatrix, DVector};
//! use numex_linalg::LuSolver;
//!
//! let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
//! let mut solver = LuSolver::new(a).unwrap();
//!
//! let x = solver.solve(&DVector::from_vec(vec![4.0, 8.0])).unwrap();
//! assert_eq!(x.as_slice(), &[2.0, 2.0]);
//!
//! // The factorization is reused for the next right-hand side
//! let y = solver.solve(&DVector::from_vec(vec![2.0, 2.0])).unwrap();
//! assert_eq!(y.as_slice(), &[1.0, 0.5]);
//! ```

pub mod dense;
pub mod lu;
pub mod permutation;
pub mod permuted;
pub mod substitution;

// Re-export main types for convenience
pub use dense::{checked_mul, relative_residual, residual, transpose};
pub use lu::{lu_factorize, lu_solve, LuFactors, LuSolver};
pub use permutation::Permutation;
pub use permuted::{PermutedRows, PermutedRowsMut};
pub use substitution::{backward_substitute, forward_substitute, unpermute};
