//! Sparse matrix-vector multiplication (SpMV)

use ndarray::{Array1, ArrayView1};
use num_traits::Num;
use std::ops::AddAssign;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrixCSR;

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Computes `y = A·x`
    ///
    /// # Errors
    ///
    /// [`SparseError::DimensionMismatch`] if `x.len() != n_cols`; nothing is
    /// computed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use csrcore::SparseMatrixCSR;
    ///
    /// let a = SparseMatrixCSR::from_triplets(2, 2, vec![(0, 0, 1.0), (1, 1, 1.0)]).unwrap();
    /// assert_eq!(a.multiply(&[5.0, -2.0]).unwrap(), vec![5.0, -2.0]);
    /// ```
    pub fn multiply(&self, x: &[T]) -> Result<Vec<T>> {
        let mut y = vec![T::zero(); self.n_rows()];
        self.multiply_into(x, &mut y)?;
        Ok(y)
    }

    /// Computes `y = A·x` into a caller-provided buffer
    ///
    /// Every element of `y` is overwritten. No allocation takes place.
    ///
    /// # Errors
    ///
    /// [`SparseError::DimensionMismatch`] if `x.len() != n_cols` or
    /// `y.len() != n_rows`.
    pub fn multiply_into(&self, x: &[T], y: &mut [T]) -> Result<()> {
        self.check_operands(x.len(), y.len())?;

        let row_ptr = self.row_ptr();
        let col_idx = self.col_idx();
        let values = self.values();

        for (i, out) in y.iter_mut().enumerate() {
            let (start, end) = (row_ptr[i], row_ptr[i + 1]);
            *out = row_dot(&col_idx[start..end], &values[start..end], x);
        }

        Ok(())
    }

    /// Computes `y = A·x` for ndarray vectors
    pub fn multiply_array(&self, x: &ArrayView1<'_, T>) -> Result<Array1<T>> {
        if x.len() != self.n_cols() {
            return Err(SparseError::DimensionMismatch {
                expected: self.n_cols(),
                found: x.len(),
            });
        }

        match x.as_slice() {
            Some(contiguous) => self.multiply(contiguous).map(Array1::from),
            None => {
                let owned: Vec<T> = x.iter().copied().collect();
                self.multiply(&owned).map(Array1::from)
            }
        }
    }

    pub(crate) fn check_operands(&self, x_len: usize, y_len: usize) -> Result<()> {
        if x_len != self.n_cols() {
            return Err(SparseError::DimensionMismatch {
                expected: self.n_cols(),
                found: x_len,
            });
        }
        if y_len != self.n_rows() {
            return Err(SparseError::DimensionMismatch {
                expected: self.n_rows(),
                found: y_len,
            });
        }
        Ok(())
    }
}

/// Dot product of one CSR row with a dense vector
#[inline]
pub(crate) fn row_dot<T>(cols: &[usize], vals: &[T], x: &[T]) -> T
where
    T: Copy + Num + AddAssign,
{
    let mut sum = T::zero();
    for (&col, &val) in cols.iter().zip(vals) {
        sum += val * x[col];
    }
    sum
}
