//! Row-permuted views over a dense matrix.
//!
//! The factorization never moves rows in storage. Every access goes through
//! the permutation vector instead, and these views keep that indexing in one
//! place: `view[(i, j)]` is entry `(p[i], j)` of the underlying matrix.

use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// Read-only view of a matrix with rows reordered by a permutation.
#[derive(Debug, Clone, Copy)]
pub struct PermutedRows<'a, T> {
    matrix: &'a DMatrix<T>,
    rows: &'a [usize],
}

impl<'a, T> PermutedRows<'a, T> {
    /// Wrap `matrix` so that logical row `i` is storage row `rows[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` does not have one entry per matrix row.
    pub fn new(matrix: &'a DMatrix<T>, rows: &'a [usize]) -> Self {
        assert_eq!(
            rows.len(),
            matrix.nrows(),
            "permutation length must match the row count"
        );
        Self { matrix, rows }
    }

    /// Number of logical rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Storage row holding logical row `i`.
    #[inline]
    pub fn storage_row(&self, i: usize) -> usize {
        self.rows[i]
    }
}

impl<T> Index<(usize, usize)> for PermutedRows<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.matrix[(self.rows[i], j)]
    }
}

/// Mutable view of a matrix with rows reordered by a permutation.
#[derive(Debug)]
pub struct PermutedRowsMut<'a, T> {
    matrix: &'a mut DMatrix<T>,
    rows: &'a [usize],
}

impl<'a, T> PermutedRowsMut<'a, T> {
    /// Wrap `matrix` so that logical row `i` is storage row `rows[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` does not have one entry per matrix row.
    pub fn new(matrix: &'a mut DMatrix<T>, rows: &'a [usize]) -> Self {
        assert_eq!(
            rows.len(),
            matrix.nrows(),
            "permutation length must match the row count"
        );
        Self { matrix, rows }
    }

    /// Number of logical rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> PermutedRows<'_, T> {
        PermutedRows {
            matrix: &*self.matrix,
            rows: self.rows,
        }
    }
}

impl<T> PermutedRowsMut<'_, T>
where
    T: nalgebra::Scalar + Copy + std::ops::Mul<Output = T> + std::ops::SubAssign,
{
    /// `row[target] -= factor * row[source]` on columns `from_col..`.
    pub fn sub_scaled_row(&mut self, target: usize, source: usize, factor: T, from_col: usize) {
        let (t, s) = (self.rows[target], self.rows[source]);
        for j in from_col..self.matrix.ncols() {
            let value = self.matrix[(s, j)];
            self.matrix[(t, j)] -= factor * value;
        }
    }
}

impl<T> Index<(usize, usize)> for PermutedRowsMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.matrix[(self.rows[i], j)]
    }
}

impl<T> IndexMut<(usize, usize)> for PermutedRowsMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.matrix[(self.rows[i], j)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reads_through_permutation() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let rows = [2, 0, 1];
        let view = PermutedRows::new(&a, &rows);

        assert_eq!(view[(0, 0)], 5.0);
        assert_eq!(view[(1, 1)], 2.0);
        assert_eq!(view[(2, 0)], 3.0);
        assert_eq!(view.storage_row(0), 2);
        assert_eq!((view.nrows(), view.ncols()), (3, 2));
    }

    #[test]
    fn test_mut_view_writes_storage_rows() {
        let mut a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let rows = [1, 0];
        {
            let mut view = PermutedRowsMut::new(&mut a, &rows);
            view[(0, 1)] = 10.0;
            assert_eq!(view.as_view()[(0, 1)], 10.0);
        }
        assert_eq!(a[(1, 1)], 10.0);
        assert_eq!(a[(0, 1)], 2.0);
    }

    #[test]
    fn test_sub_scaled_row() {
        let mut a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let rows = [1, 0];
        let mut view = PermutedRowsMut::new(&mut a, &rows);
        // logical row 1 (storage row 0) -= 0.5 * logical row 0 (storage row 1), from column 1
        view.sub_scaled_row(1, 0, 0.5, 1);
        assert_eq!(a, DMatrix::from_row_slice(2, 3, &[1.0, -0.5, 0.0, 4.0, 5.0, 6.0]));
    }

    #[test]
    #[should_panic(expected = "permutation length")]
    fn test_length_mismatch_panics() {
        let a = DMatrix::<f64>::zeros(3, 3);
        let rows = [0, 1];
        let _ = PermutedRows::new(&a, &rows);
    }
}
