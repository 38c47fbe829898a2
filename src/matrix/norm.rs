//! Matrix norms over CSR storage

use num_traits::Float;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrixCSR;

/// The supported matrix norms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormKind {
    /// Square root of the sum of squares of all stored entries
    Frobenius,
    /// Maximum absolute row sum
    Infinity,
    /// Maximum absolute column sum
    One,
}

impl NormKind {
    pub const ALL: [NormKind; 3] = [NormKind::Frobenius, NormKind::Infinity, NormKind::One];

    /// Short selector name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            NormKind::Frobenius => "fro",
            NormKind::Infinity => "inf",
            NormKind::One => "1",
        }
    }
}

impl fmt::Display for NormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormKind {
    type Err = SparseError;

    /// Accepts `fro`/`frobenius`, `inf`/`infinity`/`max` and `1`/`one`, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fro" | "frobenius" => Ok(NormKind::Frobenius),
            "inf" | "infinity" | "max" => Ok(NormKind::Infinity),
            "1" | "one" => Ok(NormKind::One),
            _ => Err(SparseError::UnsupportedNormKind(s.to_string())),
        }
    }
}

impl<T> SparseMatrixCSR<T>
where
    T: Float,
{
    /// Computes the requested norm
    ///
    /// All three norms are a single pass over the stored entries. A matrix
    /// without entries has norm zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use csrcore::{NormKind, SparseMatrixCSR};
    ///
    /// let a = SparseMatrixCSR::from_triplets(1, 2, vec![(0, 0, 3.0), (0, 1, 4.0)]).unwrap();
    /// assert_eq!(a.norm(NormKind::Frobenius), 5.0);
    /// ```
    pub fn norm(&self, kind: NormKind) -> T {
        match kind {
            NormKind::Frobenius => self.frobenius_norm(),
            NormKind::Infinity => self.infinity_norm(),
            NormKind::One => self.one_norm(),
        }
    }

    /// Computes a norm selected by name, e.g. `"fro"`, `"inf"` or `"1"`
    ///
    /// # Errors
    ///
    /// [`SparseError::UnsupportedNormKind`] if `kind` names no supported norm.
    pub fn norm_by_name(&self, kind: &str) -> Result<T> {
        let kind: NormKind = kind.parse()?;
        Ok(self.norm(kind))
    }

    pub fn frobenius_norm(&self) -> T {
        sum_of_squares(self.values()).sqrt()
    }

    pub fn infinity_norm(&self) -> T {
        let row_ptr = self.row_ptr();
        let values = self.values();

        (0..self.n_rows())
            .map(|i| abs_sum(&values[row_ptr[i]..row_ptr[i + 1]]))
            .fold(T::zero(), T::max)
    }

    /// Max absolute column sum, accumulated in one scan with an `n_cols` buffer
    pub fn one_norm(&self) -> T {
        let mut col_sums = vec![T::zero(); self.n_cols()];

        for (&col, &val) in self.col_idx().iter().zip(self.values()) {
            col_sums[col] = col_sums[col] + val.abs();
        }

        col_sums.into_iter().fold(T::zero(), T::max)
    }
}

pub(crate) fn sum_of_squares<T: Float>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &v| acc + v * v)
}

pub(crate) fn abs_sum<T: Float>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &v| acc + v.abs())
}
