//! Error type shared by all sparse matrix operations

use thiserror::Error;

/// Errors raised by construction, multiplication and norm computation.
///
/// Every variant describes a caller error; none of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseError {
    /// A triplet or lookup referenced a position outside the matrix shape.
    #[error("index ({row}, {col}) out of range for {n_rows} × {n_cols} matrix")]
    OutOfRangeIndex {
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },

    /// A dense vector's length disagrees with the matrix dimension it pairs with.
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The norm selector did not name a supported norm.
    #[error("unsupported norm kind: {0:?} (expected \"fro\", \"inf\" or \"1\")")]
    UnsupportedNormKind(String),

    /// Raw CSR arrays do not describe a valid matrix.
    #[error("invalid CSR structure: {0}")]
    InvalidStructure(String),

    /// Mutable access was requested for a position that holds no stored entry.
    #[error("entry ({row}, {col}) is not stored; the sparsity pattern is fixed after construction")]
    EntryNotStored { row: usize, col: usize },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SparseError>;
