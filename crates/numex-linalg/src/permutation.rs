//! Row permutation vector recorded during pivoting.

use nalgebra::DMatrix;
use numex_core::types::Scalar;

/// Ordered sequence of distinct row indices.
///
/// Entry `i` names the storage row that holds logical pivot row `i`. The
/// vector starts as the identity and is only changed by [`swap`](Self::swap),
/// so it is a permutation of `0..len` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
    swaps: usize,
}

impl Permutation {
    /// Identity permutation of length `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            swaps: 0,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true for the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Exchange logical rows `a` and `b`. Swapping a row with itself is a no-op.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a != b {
            self.indices.swap(a, b);
            self.swaps += 1;
        }
    }

    /// Number of effective swaps applied since construction.
    pub fn swap_count(&self) -> usize {
        self.swaps
    }

    /// `+1` for an even permutation, `-1` for an odd one.
    pub fn sign<T: Scalar>(&self) -> T {
        if self.swaps % 2 == 0 {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Storage row holding logical row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> usize {
        self.indices[i]
    }

    /// The indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Returns true if no row has moved.
    pub fn is_identity(&self) -> bool {
        self.indices.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Materialise `P·A`: row `i` of the result is row `p[i]` of `matrix`.
    pub fn permute_rows<T: Scalar>(&self, matrix: &DMatrix<T>) -> DMatrix<T> {
        DMatrix::from_fn(self.len(), matrix.ncols(), |i, j| {
            matrix[(self.indices[i], j)]
        })
    }
}
