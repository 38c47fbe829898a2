// Matrix data structures and operations

pub mod config;
pub mod csr;
pub mod norm;
pub mod spmv;
pub mod triplet;

pub use config::{CsrConfig, SystemParameters};
pub use csr::SparseMatrixCSR;
pub use norm::NormKind;
pub use triplet::{build, Triplet};
