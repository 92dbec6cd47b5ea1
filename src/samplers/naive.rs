//! Naive rejection sampler.

use crate::error::{Result, check_sample_size};
use rand::Rng;
use std::collections::HashSet;

/// Draw indices uniformly from `[0, n)` until `k` distinct ones were seen.
///
/// Output order is draw order. Expected draws grow like `n * ln(n / (n - k))`,
/// so this degrades sharply as `k` approaches `n`; it is kept as a baseline.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn naive_sample<T: Clone, R: Rng + ?Sized>(data: &[T], k: usize, rng: &mut R) -> Result<Vec<T>> {
    let n = data.len();
    check_sample_size(n, k)?;

    let mut picked = HashSet::with_capacity(k);
    let mut sample = Vec::with_capacity(k);
    while sample.len() < k {
        let idx = rng.random_range(0..n);
        if picked.insert(idx) {
            sample.push(data[idx].clone());
        }
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleError;
    use crate::rng::SplitMix64;

    #[test]
    fn small_naive_sample() {
        let xs = vec![3, 5, 1, 2, 3, 8, 6, 3];
        let sample = naive_sample(&xs, 3, &mut SplitMix64::new(1)).unwrap();
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let xs: Vec<u32> = (0..200).collect();
        let mut sample = naive_sample(&xs, 200, &mut SplitMix64::new(2)).unwrap();
        sample.sort_unstable();
        assert_eq!(sample, xs);
    }

    #[test]
    fn distinct_indices() {
        let xs: Vec<usize> = (0..10_000).collect();
        let sample = naive_sample(&xs, 1_000, &mut SplitMix64::new(3)).unwrap();
        let unique: HashSet<_> = sample.iter().collect();
        assert_eq!(unique.len(), 1_000);
    }

    #[test]
    fn rejects_oversized_k() {
        let xs = [1, 2, 3, 4, 5];
        assert!(matches!(
            naive_sample(&xs, 6, &mut SplitMix64::new(0)),
            Err(SampleError::InvalidSampleSize { k: 6, n: 5 })
        ));
    }

    #[test]
    fn empty_sample_from_empty_data() {
        let xs: [u8; 0] = [];
        assert!(naive_sample(&xs, 0, &mut SplitMix64::new(0)).unwrap().is_empty());
    }
}
