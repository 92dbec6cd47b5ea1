//! k-th smallest selection over priority tables.
//!
//! `k` is 1-based throughout: `k == 1` is the minimum, `k == len` the maximum.

use crate::rng::KeyedStream;
use log::trace;
use rand::Rng;
use rayon::prelude::*;
use std::borrow::Cow;

/// Below this many candidates the parallel selector finishes sequentially.
pub const SEQUENTIAL_CUTOFF: usize = 4_096;

/// k-th smallest value, reordering `values` in place.
///
/// Linear expected time (introselect via `select_nth_unstable`), no full sort.
/// Returns `None` when `k == 0` or `k > values.len()`.
pub fn kth_smallest(values: &mut [u64], k: usize) -> Option<u64> {
    if k == 0 || k > values.len() {
        return None;
    }
    let (_, kth, _) = values.select_nth_unstable(k - 1);
    Some(*kth)
}

/// Parallel k-th smallest value; `values` is left untouched.
///
/// Randomized quickselect with a three-way parallel partition per level, so
/// ties around the pivot always shrink the candidate set. Pivot positions are
/// drawn from `pivots`, keyed by recursion depth.
pub fn par_kth_smallest(values: &[u64], k: usize, pivots: &KeyedStream) -> Option<u64> {
    if k == 0 || k > values.len() {
        return None;
    }

    let mut candidates: Cow<'_, [u64]> = Cow::Borrowed(values);
    let mut k = k;
    let mut depth = 0u64;

    while candidates.len() > SEQUENTIAL_CUTOFF {
        let pivot = candidates[pivots.at(depth).random_range(0..candidates.len())];
        let (less, equal) = candidates
            .par_iter()
            .map(|&v| (usize::from(v < pivot), usize::from(v == pivot)))
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));
        trace!(
            "select depth {depth}: {} candidates, pivot {pivot}, less {less}, equal {equal}",
            candidates.len()
        );

        if k <= less {
            candidates = Cow::Owned(candidates.par_iter().copied().filter(|&v| v < pivot).collect());
        } else if k <= less + equal {
            return Some(pivot);
        } else {
            k -= less + equal;
            candidates = Cow::Owned(candidates.par_iter().copied().filter(|&v| v > pivot).collect());
        }
        depth += 1;
    }

    kth_smallest(candidates.to_mut(), k)
}
