//! # Row-parallel SpMV and norms
//!
//! Rayon-backed versions of [`SparseMatrixCSR::multiply`] and
//! [`SparseMatrixCSR::norm`]. The matrix is shared read-only between
//! workers; every worker owns the output rows it writes.
//!
//! SpMV and the infinity norm reproduce the sequential results bit for bit
//! since each row is still summed in storage order. The Frobenius and one
//! norms combine partial sums from different workers and can differ from
//! the sequential result by rounding.

use log::{debug, trace, warn};
use num_traits::{Float, Num};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::HashMap;
use std::ops::AddAssign;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::Result;
use crate::matrix::config::CsrConfig;
use crate::matrix::norm::{abs_sum, sum_of_squares};
use crate::matrix::spmv::row_dot;
use crate::matrix::{NormKind, SparseMatrixCSR};

/// Computes `y = A·x`, splitting rows across threads
///
/// Falls back to [`SparseMatrixCSR::multiply`] when `config` says the matrix
/// is too small to be worth splitting.
///
/// # Examples
///
/// ```
/// use csrcore::{multiply_parallel, CsrConfig, SparseMatrixCSR};
///
/// let a = SparseMatrixCSR::<f64>::identity(3);
/// let y = multiply_parallel(&a, &[1.0, 2.0, 3.0], &CsrConfig::default()).unwrap();
/// assert_eq!(y, vec![1.0, 2.0, 3.0]);
/// ```
pub fn multiply_parallel<T>(matrix: &SparseMatrixCSR<T>, x: &[T], config: &CsrConfig) -> Result<Vec<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    if !config.use_parallel(matrix.n_rows()) {
        trace!("spmv: {} rows, sequential path", matrix.n_rows());
        return matrix.multiply(x);
    }

    let mut y = vec![T::zero(); matrix.n_rows()];
    matrix.check_operands(x.len(), y.len())?;

    trace!(
        "spmv: {} rows on {} threads",
        matrix.n_rows(),
        config.system_params.n_threads
    );

    let row_ptr = matrix.row_ptr();
    let col_idx = matrix.col_idx();
    let values = matrix.values();

    run_in_pool(config, || {
        y.par_iter_mut().enumerate().for_each(|(i, out)| {
            let (start, end) = (row_ptr[i], row_ptr[i + 1]);
            *out = row_dot(&col_idx[start..end], &values[start..end], x);
        });
    });

    Ok(y)
}

/// Computes a norm, splitting the scan across threads
pub fn norm_parallel<T>(matrix: &SparseMatrixCSR<T>, kind: NormKind, config: &CsrConfig) -> T
where
    T: Float + Send + Sync,
{
    if !config.use_parallel(matrix.n_rows()) {
        trace!("{} norm: {} rows, sequential path", kind, matrix.n_rows());
        return matrix.norm(kind);
    }

    let row_ptr = matrix.row_ptr();
    let col_idx = matrix.col_idx();
    let values = matrix.values();
    let n_rows = matrix.n_rows();
    let n_cols = matrix.n_cols();

    run_in_pool(config, || match kind {
        NormKind::Frobenius => (0..n_rows)
            .into_par_iter()
            .map(|i| sum_of_squares(&values[row_ptr[i]..row_ptr[i + 1]]))
            .reduce(T::zero, |a, b| a + b)
            .sqrt(),

        NormKind::Infinity => (0..n_rows)
            .into_par_iter()
            .map(|i| abs_sum(&values[row_ptr[i]..row_ptr[i + 1]]))
            .reduce(T::zero, T::max),

        // Each worker accumulates column sums for its rows, then buffers are added
        NormKind::One => (0..n_rows)
            .into_par_iter()
            .fold(
                || vec![T::zero(); n_cols],
                |mut sums, i| {
                    for k in row_ptr[i]..row_ptr[i + 1] {
                        sums[col_idx[k]] = sums[col_idx[k]] + values[k].abs();
                    }
                    sums
                },
            )
            .reduce(
                || vec![T::zero(); n_cols],
                |mut left, right| {
                    for (l, r) in left.iter_mut().zip(right) {
                        *l = *l + r;
                    }
                    left
                },
            )
            .into_iter()
            .fold(T::zero(), T::max),
    })
}

/// Dedicated pools, built once per thread count and kept for the process
static POOLS: OnceLock<Mutex<HashMap<usize, Arc<ThreadPool>>>> = OnceLock::new();

/// Returns the cached pool with `n_threads` workers, building it on first use
fn cached_pool(n_threads: usize) -> Option<Arc<ThreadPool>> {
    let pools = POOLS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut pools = pools.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(pool) = pools.get(&n_threads) {
        return Some(Arc::clone(pool));
    }

    match ThreadPoolBuilder::new().num_threads(n_threads).build() {
        Ok(pool) => {
            debug!("built a {}-thread pool", n_threads);
            let pool = Arc::new(pool);
            pools.insert(n_threads, Arc::clone(&pool));
            Some(pool)
        }
        Err(e) => {
            warn!("could not build a {}-thread pool ({}), using the global pool", n_threads, e);
            None
        }
    }
}

/// Runs `op` on the global rayon pool, or on a dedicated pool when the
/// configured thread count differs from it
fn run_in_pool<R, F>(config: &CsrConfig, op: F) -> R
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    let n_threads = config.system_params.n_threads;
    if n_threads == rayon::current_num_threads() {
        return op();
    }

    match cached_pool(n_threads) {
        Some(pool) => pool.install(op),
        None => op(),
    }
}
