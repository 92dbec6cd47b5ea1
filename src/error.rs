//! Error types shared by every sampler.

use thiserror::Error;

/// Errors returned by the samplers and their building blocks.
///
/// Every check happens before the first random draw, so an `Err` never
/// leaves partially permuted data or consumed randomness behind.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Asked for more elements than the dataset holds.
    #[error("invalid sample size: cannot draw {k} elements from {n}")]
    InvalidSampleSize { k: usize, n: usize },

    /// A swap target table entry points outside `[index, len)`.
    #[error("invalid swap target {target} at index {index} (table length {len})")]
    InvalidSwapTarget {
        index: usize,
        target: usize,
        len: usize,
    },

    /// The swap target table does not cover the array being permuted.
    #[error("swap target table has {actual} entries, expected {expected}")]
    SwapTableLength { expected: usize, actual: usize },

    /// A dedicated rayon pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A strategy name did not match any known sampler.
    #[error("unknown sampling strategy: {0}")]
    UnknownStrategy(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SampleError>;

/// Fails with [`SampleError::InvalidSampleSize`] unless `k <= n`.
#[inline]
pub fn check_sample_size(n: usize, k: usize) -> Result<()> {
    if k > n {
        return Err(SampleError::InvalidSampleSize { k, n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_size_bounds() {
        assert!(check_sample_size(5, 0).is_ok());
        assert!(check_sample_size(5, 5).is_ok());
        assert!(matches!(
            check_sample_size(5, 6),
            Err(SampleError::InvalidSampleSize { k: 6, n: 5 })
        ));
    }

    #[test]
    fn messages_name_the_sizes() {
        let err = SampleError::InvalidSampleSize { k: 6, n: 5 };
        assert_eq!(
            err.to_string(),
            "invalid sample size: cannot draw 6 elements from 5"
        );
    }
}
