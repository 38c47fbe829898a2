//! Construction of CSR matrices from coordinate triplets
//!
//! Triplets arrive unordered and may repeat a position. Construction is a
//! bucket-counting sort: count entries per row, prefix-sum the counts into
//! row offsets, scatter every triplet into its row bucket, then sort each
//! (short) row by column and merge repeated columns by summation. This is
//! O(nnz + n_rows) apart from the per-row sorts.

use log::debug;
use num_traits::Num;
use std::ops::AddAssign;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrixCSR;
use crate::utils::{bucket_counts, exclusive_scan};

/// Rows up to this length are ordered with insertion sort
const INSERTION_SORT_MAX_LEN: usize = 32;

/// A single coordinate entry `(row, col, value)`
pub type Triplet<T> = (usize, usize, T);

/// Builds a CSR matrix from coordinate triplets
///
/// Free-function form of [`SparseMatrixCSR::from_triplets`].
pub fn build<T, I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<SparseMatrixCSR<T>>
where
    T: Copy + Num + AddAssign,
    I: IntoIterator<Item = Triplet<T>>,
{
    SparseMatrixCSR::from_triplets(n_rows, n_cols, triplets)
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Builds a CSR matrix from an unordered list of `(row, col, value)` triplets
    ///
    /// Triplets sharing a position are summed into a single stored entry, so
    /// the resulting `nnz` may be smaller than the number of triplets.
    /// Explicit zeros are stored like any other value.
    ///
    /// # Errors
    ///
    /// [`SparseError::OutOfRangeIndex`] for the first triplet outside
    /// `n_rows × n_cols`. No matrix is produced in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use csrcore::SparseMatrixCSR;
    ///
    /// let m = SparseMatrixCSR::from_triplets(2, 2, vec![(1, 0, 2.0), (0, 1, 1.0), (1, 0, 3.0)]).unwrap();
    /// assert_eq!(m.nnz(), 2);
    /// assert_eq!(m.get(1, 0).unwrap(), 5.0);
    /// ```
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = Triplet<T>>,
    {
        let triplets: Vec<Triplet<T>> = triplets.into_iter().collect();

        // 1. Validate everything before allocating any storage
        if let Some(&(row, col, _)) = triplets
            .iter()
            .find(|&&(row, col, _)| row >= n_rows || col >= n_cols)
        {
            return Err(SparseError::OutOfRangeIndex { row, col, n_rows, n_cols });
        }

        // 2. Row offsets from per-row counts
        let counts = bucket_counts(triplets.iter().map(|&(row, _, _)| row), n_rows);
        let bucket_ptr = exclusive_scan(&counts);

        // 3. Scatter into row buckets
        let mut next = bucket_ptr.clone();
        let mut entries = vec![(0usize, T::zero()); triplets.len()];
        for &(row, col, value) in &triplets {
            entries[next[row]] = (col, value);
            next[row] += 1;
        }

        // 4. Sort each bucket, merge duplicate columns and compact
        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        row_ptr.push(0);

        for i in 0..n_rows {
            let bucket = &mut entries[bucket_ptr[i]..bucket_ptr[i + 1]];
            sort_by_column(bucket);

            let mut last_col = None;
            for &(col, value) in bucket.iter() {
                if last_col == Some(col) {
                    if let Some(merged) = values.last_mut() {
                        *merged += value;
                    }
                } else {
                    col_idx.push(col);
                    values.push(value);
                    last_col = Some(col);
                }
            }

            row_ptr.push(col_idx.len());
        }

        debug!(
            "built {}×{} CSR matrix from {} triplets ({} duplicates merged, nnz = {})",
            n_rows,
            n_cols,
            triplets.len(),
            triplets.len() - col_idx.len(),
            col_idx.len()
        );

        Ok(Self::from_parts_unchecked(n_rows, n_cols, row_ptr, col_idx, values))
    }

    /// Replaces the contents of this matrix with a matrix built from `triplets`
    ///
    /// The shape is kept. On error the matrix is left unchanged.
    pub fn rebuild<I>(&mut self, triplets: I) -> Result<()>
    where
        I: IntoIterator<Item = Triplet<T>>,
    {
        let rebuilt = Self::from_triplets(self.n_rows(), self.n_cols(), triplets)?;
        *self = rebuilt;
        Ok(())
    }
}

impl<T: Copy> SparseMatrixCSR<T> {
    /// Reads all stored entries back as triplets, in row-major order
    pub fn to_triplets(&self) -> Vec<Triplet<T>> {
        let mut triplets = Vec::with_capacity(self.nnz());

        for i in 0..self.n_rows() {
            triplets.extend(self.row_iter(i).map(|(col, &value)| (i, col, value)));
        }

        triplets
    }
}

/// Orders a row bucket by column; stable so equal columns keep input order
fn sort_by_column<T: Copy>(bucket: &mut [(usize, T)]) {
    if bucket.len() <= INSERTION_SORT_MAX_LEN {
        for i in 1..bucket.len() {
            let mut j = i;
            while j > 0 && bucket[j - 1].0 > bucket[j].0 {
                bucket.swap(j - 1, j);
                j -= 1;
            }
        }
    } else {
        bucket.sort_by_key(|&(col, _)| col);
    }
}
