//! Triangular substitution against packed LU factors.
//!
//! Both passes read the factors and the right-hand side through the pivot
//! permutation, so no permuted copy of `b` is made during the sweeps. Slot
//! `p[i]` of the right-hand side belongs to logical row `i`: it starts as
//! `b[p[i]]`, holds `y[i]` after the forward pass and `x[i]` after the
//! backward pass. [`unpermute`] then moves every `x[i]` to slot `i`.

use crate::permuted::PermutedRows;
use numex_core::types::Scalar;

/// Solve `L·y = P·b` in place, with `L` unit lower triangular.
///
/// `lu` holds the multipliers strictly below the logical diagonal. On return
/// `rhs[p[i]]` holds `y[i]`.
///
/// # Panics
///
/// Panics if `rhs` is shorter than the number of rows in `lu`.
pub fn forward_substitute<T: Scalar>(lu: PermutedRows<'_, T>, rhs: &mut [T]) {
    for i in 0..lu.nrows() {
        let pi = lu.storage_row(i);
        let mut f = rhs[pi];
        for k in 0..i {
            f -= lu[(i, k)] * rhs[lu.storage_row(k)];
        }
        rhs[pi] = f;
    }
}

/// Solve `U·x = y` in place, with `U` upper triangular including its diagonal.
///
/// Expects the layout left by [`forward_substitute`]. A zero diagonal entry
/// yields non-finite values; callers screen pivots during factorization.
///
/// # Panics
///
/// Panics if `rhs` is shorter than the number of rows in `lu`.
pub fn backward_substitute<T: Scalar>(lu: PermutedRows<'_, T>, rhs: &mut [T]) {
    let n = lu.nrows();
    for i in (0..n).rev() {
        let pi = lu.storage_row(i);
        let mut f = rhs[pi];
        for k in (i + 1)..lu.ncols() {
            f -= lu[(i, k)] * rhs[lu.storage_row(k)];
        }
        rhs[pi] = f / lu[(i, i)];
    }
}

/// Gather `rhs[i] = rhs[p[i]]` for every `i`, restoring variable order.
///
/// # Panics
///
/// Panics if `rhs` is shorter than `rows`.
pub fn unpermute<T: Copy>(rows: &[usize], rhs: &mut [T]) {
    if rows.iter().enumerate().all(|(i, &p)| i == p) {
        return;
    }
    let solved: Vec<T> = rows.iter().map(|&p| rhs[p]).collect();
    rhs[..solved.len()].copy_from_slice(&solved);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn test_forward_unit_lower() {
        // L = [[1, 0], [2, 1]], identity permutation
        let lu = DMatrix::from_row_slice(2, 2, &[9.0, 9.0, 2.0, 9.0]);
        let rows = [0, 1];
        let mut b = [1.0, 5.0];

        forward_substitute(PermutedRows::new(&lu, &rows), &mut b);
        assert_relative_eq!(b[0], 1.0);
        assert_relative_eq!(b[1], 3.0);
    }

    #[test]
    fn test_backward_upper() {
        // U = [[2, 1], [0, 4]]
        let lu = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 7.0, 4.0]);
        let rows = [0, 1];
        let mut y = [5.0, 8.0];

        backward_substitute(PermutedRows::new(&lu, &rows), &mut y);
        assert_relative_eq!(y[1], 2.0);
        assert_relative_eq!(y[0], 1.5);
    }

    #[test]
    fn test_substitution_through_permutation() {
        // Storage row 1 is logical row 0: U = [[4, 2], [0, 3]], L multiplier 0.5
        let lu = DMatrix::from_row_slice(2, 2, &[0.5, 3.0, 4.0, 2.0]);
        let rows = [1, 0];
        // P·A = [[4, 2], [2, 4]], x = [1, 1] gives P·b = [6, 6]
        let mut b = [6.0, 6.0];

        let view = PermutedRows::new(&lu, &rows);
        forward_substitute(view, &mut b);
        assert_relative_eq!(b[1], 6.0);
        assert_relative_eq!(b[0], 3.0);

        backward_substitute(view, &mut b);
        assert_relative_eq!(b[0], 1.0, epsilon = 1e-14);
        assert_relative_eq!(b[1], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_unpermute() {
        let mut slots = [10.0, 20.0, 30.0];
        // x[0] lives in slot 2, x[1] in slot 0, x[2] in slot 1
        unpermute(&[2, 0, 1], &mut slots);
        assert_eq!(slots, [30.0, 10.0, 20.0]);

        let mut unchanged = [1, 2, 3];
        unpermute(&[0, 1, 2], &mut unchanged);
        assert_eq!(unchanged, [1, 2, 3]);
    }
}
