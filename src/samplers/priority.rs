//! Priority sampling: keep the elements holding the k smallest random priorities.
//!
//! Both variants keep `priority(i) <= threshold`, where `threshold` is the
//! k-th smallest priority, scanning in original index order and stopping at
//! `k`. When several elements tie at the threshold the first ones by index win,
//! so tied elements are not chosen uniformly. Both variants apply the same
//! rule, so their output distributions are identical.

use crate::error::{Result, check_sample_size};
use crate::priority::{assign_priorities, par_assign_priorities, priority_stream};
use crate::rng::KeyedStream;
use crate::select::{kth_smallest, par_kth_smallest};
use rand::{Rng, RngCore};
use rayon::prelude::*;

/// Tag for the pivot stream derived from a parallel sampler's keyed stream.
const PIVOT_STREAM: u64 = 1;

/// Indices chosen by a priority pass, in increasing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrioritySelection {
    /// k-th smallest priority; `None` when `k == 0`.
    pub threshold: Option<u64>,
    /// Original indices with `priority <= threshold`, first `k` by index.
    pub indices: Vec<usize>,
}

/// Sequential priority pass over `n` elements using the stream seeded by `seed`.
///
/// Priorities are drawn once to find the threshold, dropped, and replayed
/// from the same seed for the filtering scan.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > n`.
pub fn seq_priority_select(n: usize, k: usize, seed: u64) -> Result<PrioritySelection> {
    check_sample_size(n, k)?;

    let mut priorities = assign_priorities(n, &mut priority_stream(seed));
    let Some(threshold) = kth_smallest(&mut priorities, k) else {
        return Ok(PrioritySelection::default());
    };
    drop(priorities);

    let mut replay = priority_stream(seed);
    let indices = filter_by_threshold((0..n).map(|_| replay.next_u64()), threshold, k);
    Ok(PrioritySelection {
        threshold: Some(threshold),
        indices,
    })
}

/// Parallel priority pass: keyed priorities, parallel selection and filter.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > n`.
pub fn par_priority_select(n: usize, k: usize, keyed: &KeyedStream) -> Result<PrioritySelection> {
    check_sample_size(n, k)?;

    let priorities = par_assign_priorities(n, keyed);
    let Some(threshold) = par_kth_smallest(&priorities, k, &keyed.derive(PIVOT_STREAM)) else {
        return Ok(PrioritySelection::default());
    };

    let indices = par_filter_by_threshold(&priorities, threshold, k);
    Ok(PrioritySelection {
        threshold: Some(threshold),
        indices,
    })
}

/// Indices of the first `k` priorities (by index) that are `<= threshold`.
fn filter_by_threshold(
    priorities: impl IntoIterator<Item = u64>,
    threshold: u64,
    k: usize,
) -> Vec<usize> {
    priorities
        .into_iter()
        .enumerate()
        .filter(|&(_, p)| p <= threshold)
        .map(|(i, _)| i)
        .take(k)
        .collect()
}

/// Parallel [`filter_by_threshold`] over a materialised table.
fn par_filter_by_threshold(priorities: &[u64], threshold: u64, k: usize) -> Vec<usize> {
    // Order-preserving collect, so truncation keeps the first k by index.
    let mut indices: Vec<usize> = priorities
        .par_iter()
        .enumerate()
        .filter(|&(_, &p)| p <= threshold)
        .map(|(i, _)| i)
        .collect();
    indices.truncate(k);
    indices
}

/// Sequential priority sampler; the replay seed is drawn from `rng`.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn seq_priority_sample<T: Clone, R: Rng + ?Sized>(
    data: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    check_sample_size(data.len(), k)?;
    let selection = seq_priority_select(data.len(), k, rng.next_u64())?;
    Ok(selection.indices.iter().map(|&i| data[i].clone()).collect())
}

/// Parallel priority sampler.
///
/// # Errors
/// [`crate::SampleError::InvalidSampleSize`] if `k > data.len()`.
pub fn par_priority_sample<T: Clone + Send + Sync>(
    data: &[T],
    k: usize,
    keyed: &KeyedStream,
) -> Result<Vec<T>> {
    let selection = par_priority_select(data.len(), k, keyed)?;
    Ok(selection
        .indices
        .par_iter()
        .map(|&i| data[i].clone())
        .collect())
}
