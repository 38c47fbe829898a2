//! # csrcore: compressed sparse row storage and matrix norms
//!
//! A small numerical core for sparse real matrices:
//!
//! - **Construction** from unordered `(row, col, value)` triplets using a
//!   bucket-counting sort, with duplicate positions summed
//! - **Matrix-vector multiplication** `y = A·x` in a single pass over storage
//! - **Norms**: Frobenius, infinity (max row sum) and one (max column sum)
//! - Optional **row-parallel** SpMV and norms on rayon
//! - Interop with [`sprs`] for cross-checking results
//!
//! Reading a matrix file is left to the caller; anything that yields
//! triplets can feed [`build`].
//!
//! ## Usage
//!
//! ```
//! use csrcore::{build, NormKind};
//!
//! let a = build(2, 2, vec![(0, 0, 1.0), (0, 1, -2.0), (1, 0, 3.0)]).unwrap();
//!
//! assert_eq!(a.multiply(&[1.0, 1.0]).unwrap(), vec![-1.0, 3.0]);
//! assert_eq!(a.norm(NormKind::Infinity), 3.0);
//! assert_eq!(a.norm(NormKind::One), 4.0);
//! assert_eq!(a.norm_by_name("fro").unwrap(), 14.0f64.sqrt());
//! ```

pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{Result, SparseError};
pub use matrix::{build, CsrConfig, NormKind, SparseMatrixCSR, SystemParameters, Triplet};
pub use parallel::{multiply_parallel, norm_parallel};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
