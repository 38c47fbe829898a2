//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

/// Computes an exclusive prefix sum (scan) for a vector
///
/// The output has one more element than the input: `result[0] == 0` and
/// `result[input.len()]` is the total.
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;

    result.push(0);

    for &val in input {
        sum += val;
        result.push(sum);
    }

    result
}

/// Counts how many times each bucket index in `0..n_buckets` occurs
pub fn bucket_counts<I>(indices: I, n_buckets: usize) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut counts = vec![0; n_buckets];
    for idx in indices {
        counts[idx] += 1;
    }
    counts
}
