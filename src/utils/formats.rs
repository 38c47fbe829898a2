//! Utilities for converting between our CSR format and sprs

use crate::error::Result;
use crate::matrix::SparseMatrixCSR;
use num_traits::Num;
use sprs::CsMat;

/// Converts our CSR matrix format to sprs CsMat format
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    // Our invariants (sorted, unique columns per row) are the ones sprs checks
    CsMat::new(
        matrix.shape(),
        matrix.row_ptr().to_vec(),
        matrix.col_idx().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts a sprs CsMat to our SparseMatrixCSR format
///
/// Column-compressed inputs are converted to row order first. The raw arrays
/// go through the validating constructor, so a matrix sprs accepted with
/// non-canonical storage is reported as `SparseError::InvalidStructure`.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<SparseMatrixCSR<T>>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(n_rows, n_cols, indptr, indices, data)
}
