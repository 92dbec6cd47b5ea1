//! Permutation samplers: the first `k` cells of a partial Fisher–Yates shuffle.
//!
//! All variants draw swap targets with [`crate::swaps`] and copy the data
//! before mutating it; the caller's slice is never touched.

use crate::error::{Result, check_sample_size};
use crate::permute::{par_permute_with, permute};
use crate::rng::KeyedStream;
use crate::swaps::{generate_swap_targets, par_generate_swap_targets};
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashMap;

/// Sequential reference sampler: `k` in-order swaps on a copy of `data`.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn seq_permutation_sample<T: Clone, R: Rng + ?Sized>(
    data: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    check_sample_size(data.len(), k)?;
    let targets = generate_swap_targets(data.len(), rng);
    let mut working = data.to_vec();
    permute(&mut working, k, &targets)?;
    working.truncate(k);
    Ok(working)
}

/// Sequential sampler that never copies `data`.
///
/// Tracks displaced cells in a map, so memory is `O(k)` instead of `O(n)`.
/// Draws targets from `rng` in the same order as [`seq_permutation_sample`],
/// so both return the same sample for identically seeded generators.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn sparse_permutation_sample<T: Clone, R: Rng + ?Sized>(
    data: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    let n = data.len();
    check_sample_size(n, k)?;

    // position -> index into `data` of the element currently stored there
    let mut displaced: HashMap<usize, usize> = HashMap::with_capacity(k);
    let mut sample = Vec::with_capacity(k);
    for i in 0..k {
        let target = rng.random_range(i..n);
        let at_target = displaced.get(&target).copied().unwrap_or(target);
        let at_i = displaced.remove(&i).unwrap_or(i);
        if target != i {
            displaced.insert(target, at_i);
        }
        sample.push(data[at_target].clone());
    }
    Ok(sample)
}

/// Parallel sampler running reserve/commit rounds over swaps `0..k` only.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn par_permutation_sample<T: Clone + Send + Sync>(
    data: &[T],
    k: usize,
    keyed: &KeyedStream,
    batch_divisor: usize,
) -> Result<Vec<T>> {
    permute_prefix(data, k, k, keyed, batch_divisor)
}

/// Parallel sampler running reserve/commit rounds over all `n` swaps.
///
/// Swaps at indices `>= k` only touch cells `>= k`, so the returned prefix
/// equals [`par_permutation_sample`] for the same keyed stream.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn par_permutation_full_sample<T: Clone + Send + Sync>(
    data: &[T],
    k: usize,
    keyed: &KeyedStream,
    batch_divisor: usize,
) -> Result<Vec<T>> {
    permute_prefix(data, k, data.len(), keyed, batch_divisor)
}

fn permute_prefix<T: Clone + Send + Sync>(
    data: &[T],
    k: usize,
    swaps: usize,
    keyed: &KeyedStream,
    batch_divisor: usize,
) -> Result<Vec<T>> {
    check_sample_size(data.len(), k)?;
    let targets = par_generate_swap_targets(data.len(), keyed);
    let mut working: Vec<T> = data.par_iter().cloned().collect();
    par_permute_with(&mut working, swaps, &targets, batch_divisor)?;
    working.truncate(k);
    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleError;
    use crate::permute::DEFAULT_BATCH_DIVISOR;
    use crate::rng::SplitMix64;
    use std::collections::HashSet;

    #[test]
    fn sizes_and_distinctness() {
        let data: Vec<u32> = (0..1_000).collect();
        for k in [0, 1, 10, 500, 1_000] {
            let samples = [
                seq_permutation_sample(&data, k, &mut SplitMix64::new(4)).unwrap(),
                sparse_permutation_sample(&data, k, &mut SplitMix64::new(4)).unwrap(),
                par_permutation_sample(&data, k, &KeyedStream::new(4), DEFAULT_BATCH_DIVISOR)
                    .unwrap(),
                par_permutation_full_sample(&data, k, &KeyedStream::new(4), 10).unwrap(),
            ];
            for sample in &samples {
                assert_eq!(sample.len(), k);
                assert_eq!(sample.iter().collect::<HashSet<_>>().len(), k);
            }
        }
    }

    #[test]
    fn sparse_matches_dense() {
        let data: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        for seed in 0..25 {
            for k in [0, 1, 7, 150, 300] {
                let dense = seq_permutation_sample(&data, k, &mut SplitMix64::new(seed)).unwrap();
                let sparse =
                    sparse_permutation_sample(&data, k, &mut SplitMix64::new(seed)).unwrap();
                assert_eq!(dense, sparse, "seed {seed} k {k}");
            }
        }
    }

    #[test]
    fn full_prefix_matches_k_limited() {
        let data: Vec<u64> = (0..20_000).collect();
        let keyed = KeyedStream::new(123);
        for k in [0, 3, 2_000, 19_999] {
            let partial = par_permutation_sample(&data, k, &keyed, DEFAULT_BATCH_DIVISOR).unwrap();
            let full = par_permutation_full_sample(&data, k, &keyed, 7).unwrap();
            assert_eq!(partial, full, "k {k}");
        }
    }

    #[test]
    fn caller_data_untouched() {
        let data: Vec<u32> = (0..100).collect();
        let before = data.clone();
        par_permutation_full_sample(&data, 50, &KeyedStream::new(1), 2).unwrap();
        seq_permutation_sample(&data, 50, &mut SplitMix64::new(1)).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn rejects_oversized_k() {
        let data = [1, 2, 3, 4, 5];
        assert!(matches!(
            sparse_permutation_sample(&data, 6, &mut SplitMix64::new(0)),
            Err(SampleError::InvalidSampleSize { k: 6, n: 5 })
        ));
        assert!(matches!(
            par_permutation_full_sample(&data, 6, &KeyedStream::new(0), 10),
            Err(SampleError::InvalidSampleSize { k: 6, n: 5 })
        ));
    }
}
