//! Compressed Sparse Row (CSR) matrix storage

use std::fmt;
use num_traits::Num;

use crate::error::{Result, SparseError};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing offsets into col_idx and values
/// - col_idx: Array of size nnz containing column indices of stored elements
/// - values: Array of size nnz containing the stored values
///
/// Column indices are strictly ascending within each row. Explicitly stored
/// zeros are kept as entries. The sparsity pattern never changes after
/// construction except through [`SparseMatrixCSR::rebuild`].
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<T> {
    n_rows: usize,
    n_cols: usize,

    /// row_ptr[i] is the index in col_idx and values where row i starts;
    /// row_ptr[n_rows] is equal to nnz
    row_ptr: Vec<usize>,

    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a CSR matrix from raw arrays, validating every structural invariant
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Stored values
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::InvalidStructure`] when:
    /// - row_ptr.len() is not n_rows + 1, or row_ptr[0] is not 0
    /// - col_idx.len() differs from values.len()
    /// - row_ptr[n_rows] differs from col_idx.len(), or row_ptr decreases
    /// - column indices within a row are not strictly ascending
    ///
    /// and [`SparseError::OutOfRangeIndex`] when a column index is >= n_cols.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len().checked_sub(1) != Some(n_rows) {
            return Err(SparseError::InvalidStructure(format!(
                "row_ptr.len() is {} but must be n_rows + 1 with n_rows = {}",
                row_ptr.len(),
                n_rows
            )));
        }
        if col_idx.len() != values.len() {
            return Err(SparseError::InvalidStructure(format!(
                "col_idx.len() = {} must equal values.len() = {}",
                col_idx.len(),
                values.len()
            )));
        }
        if row_ptr[0] != 0 {
            return Err(SparseError::InvalidStructure(format!(
                "row_ptr[0] is {} but must be 0",
                row_ptr[0]
            )));
        }
        if row_ptr[n_rows] != col_idx.len() {
            return Err(SparseError::InvalidStructure(format!(
                "row_ptr[n_rows] = {} must equal col_idx.len() = {}",
                row_ptr[n_rows],
                col_idx.len()
            )));
        }

        for (i, window) in row_ptr.windows(2).enumerate() {
            let (start, end) = (window[0], window[1]);
            if start > end {
                return Err(SparseError::InvalidStructure(format!(
                    "row_ptr decreases at row {}: {} > {}",
                    i, start, end
                )));
            }

            let row = &col_idx[start..end];
            for (k, &col) in row.iter().enumerate() {
                if col >= n_cols {
                    return Err(SparseError::OutOfRangeIndex { row: i, col, n_rows, n_cols });
                }
                if k > 0 && row[k - 1] >= col {
                    return Err(SparseError::InvalidStructure(format!(
                        "column indices of row {} are not strictly ascending ({} then {})",
                        i,
                        row[k - 1],
                        col
                    )));
                }
            }
        }

        Ok(Self::from_parts_unchecked(n_rows, n_cols, row_ptr, col_idx, values))
    }

    /// Assembles a matrix from arrays the caller has already proven valid
    pub(crate) fn from_parts_unchecked(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len().checked_sub(1), Some(n_rows));
        debug_assert_eq!(col_idx.len(), values.len());

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::from_parts_unchecked(n_rows, n_cols, vec![0; n_rows + 1], Vec::new(), Vec::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let row_ptr: Vec<usize> = (0..=n).collect();
        let col_idx: Vec<usize> = (0..n).collect();
        let values = vec![T::one(); n];

        Self::from_parts_unchecked(n, n, row_ptr, col_idx, values)
    }

    /// Returns the value at `(row, col)`, or zero when nothing is stored there
    ///
    /// # Errors
    ///
    /// [`SparseError::OutOfRangeIndex`] if the position lies outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_position(row, col)?;

        Ok(self
            .position(row, col)
            .map(|k| self.values[k])
            .unwrap_or_else(T::zero))
    }

    /// Returns a mutable reference to a stored entry
    ///
    /// Only stored positions can be changed; the sparsity pattern is fixed.
    ///
    /// # Errors
    ///
    /// [`SparseError::OutOfRangeIndex`] if the position lies outside the matrix,
    /// [`SparseError::EntryNotStored`] if no entry is stored at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.check_position(row, col)?;

        match self.position(row, col) {
            Some(k) => Ok(&mut self.values[k]),
            None => Err(SparseError::EntryNotStored { row, col }),
        }
    }

    fn check_position(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(SparseError::OutOfRangeIndex {
                row,
                col,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }
        Ok(())
    }

    /// Offset of `(row, col)` in the entry arrays, found by binary search
    fn position(&self, row: usize, col: usize) -> Option<usize> {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];

        self.col_idx[start..end]
            .binary_search(&col)
            .ok()
            .map(|offset| start + offset)
    }
}

impl<T> SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns in the matrix
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of stored elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of stored elements in row i
    pub fn row_nnz(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Returns an iterator over the stored elements in row i
    ///
    /// Each item is a tuple (col_idx, value), in ascending column order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows`.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Consumes the matrix, returning `(row_ptr, col_idx, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_ptr, self.col_idx, self.values)
    }
}

impl<T: fmt::Debug> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                    continue;
                }

                let shown = 5.min(end - start);
                for k in start..(start + shown) {
                    write!(f, "({}, {:?}) ", self.col_idx[k], self.values[k])?;
                }
                if end - start > shown {
                    write!(f, "... ({} more)", end - start - shown)?;
                }
                writeln!(f)?;
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
