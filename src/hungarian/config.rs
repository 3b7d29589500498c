//! Solver configuration.

/// Configuration for batch solving.
///
/// A single [`HungarianSolver::solve`](super::HungarianSolver::solve) has
/// no tunables; these settings only affect
/// [`HungarianSolver::solve_batch`](super::HungarianSolver::solve_batch).
///
/// # Examples
///
/// ```
/// use u_assign::hungarian::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_parallel(false)
///     .with_min_parallel_batch(8);
/// assert!(!config.parallel);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Whether to solve batch members in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Batches smaller than this are solved sequentially even when
    /// `parallel` is set.
    pub min_parallel_batch: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_batch: 2,
        }
    }
}

impl SolverConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_min_parallel_batch(mut self, n: usize) -> Self {
        self.min_parallel_batch = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_parallel_batch == 0 {
            return Err("min_parallel_batch must be at least 1".into());
        }
        Ok(())
    }

    /// Whether a batch of `len` matrices should be split across threads.
    pub(crate) fn use_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && len >= self.min_parallel_batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!(config.parallel);
        assert_eq!(config.min_parallel_batch, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_batch() {
        let config = SolverConfig::default().with_min_parallel_batch(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_use_parallel_respects_flag_and_size() {
        let off = SolverConfig::default().with_parallel(false);
        assert!(!off.use_parallel(100));

        let on = SolverConfig::default().with_min_parallel_batch(4);
        assert!(!on.use_parallel(3));
        assert_eq!(on.use_parallel(4), cfg!(feature = "parallel"));
    }
}
