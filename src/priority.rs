//! Per-element random priorities.

use crate::rng::{KeyedStream, SplitMix64};
use rand::RngCore;
use rayon::prelude::*;

/// Draw `n` priorities from one sequential stream, index-aligned.
///
/// Calling this again with an identically seeded stream yields the same
/// table, which lets callers replay priorities instead of storing them twice.
pub fn assign_priorities<R: RngCore + ?Sized>(n: usize, stream: &mut R) -> Vec<u64> {
    (0..n).map(|_| stream.next_u64()).collect()
}

/// Sequential priority stream for `seed`, positioned at index 0.
#[must_use]
pub const fn priority_stream(seed: u64) -> SplitMix64 {
    SplitMix64::new(seed)
}

/// Priority of index `i` under a keyed stream.
#[inline]
#[must_use]
pub fn keyed_priority(keyed: &KeyedStream, index: usize) -> u64 {
    keyed.at(index as u64).next_u64()
}

/// Parallel priorities; entry `i` only depends on the stream seed and `i`.
#[must_use]
pub fn par_assign_priorities(n: usize, keyed: &KeyedStream) -> Vec<u64> {
    (0..n)
        .into_par_iter()
        .map(|i| keyed_priority(keyed, i))
        .collect()
}
