//! Configuration and system parameters for parallel execution

/// Minimum row count before the parallel driver splits work across threads
pub const DEFAULT_PARALLEL_ROW_THRESHOLD: usize = 4096;

/// System parameters for performance tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemParameters {
    /// Number of threads to use
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Configuration for the row-parallel driver in [`crate::parallel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrConfig {
    /// System parameters for performance tuning
    pub system_params: SystemParameters,

    /// Matrices with fewer rows than this run sequentially
    pub parallel_row_threshold: usize,
}

impl Default for CsrConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            parallel_row_threshold: DEFAULT_PARALLEL_ROW_THRESHOLD,
        }
    }
}

impl CsrConfig {
    /// A config that never dispatches to worker threads
    pub fn sequential() -> Self {
        Self {
            system_params: SystemParameters { n_threads: 1 },
            parallel_row_threshold: usize::MAX,
        }
    }

    /// A config with an explicit thread count and row threshold
    pub fn with_threads(n_threads: usize, parallel_row_threshold: usize) -> Self {
        Self {
            system_params: SystemParameters {
                n_threads: n_threads.max(1),
            },
            parallel_row_threshold,
        }
    }

    /// Whether a matrix with `n_rows` rows should be processed in parallel
    pub fn use_parallel(&self, n_rows: usize) -> bool {
        self.system_params.n_threads > 1 && n_rows >= self.parallel_row_threshold
    }
}
