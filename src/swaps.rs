//! Swap target tables for the partial Fisher–Yates shuffle.

use crate::error::{Result, SampleError};
use crate::rng::KeyedStream;
use rand::Rng;
use rayon::prelude::*;
use std::ops::Deref;

/// Table mapping each index `i` of an `n`-element array to a target in `[i, n)`.
///
/// Built fresh for every sample call and read-only while permuting. Both
/// permuters accept the same table, which is what makes their outputs
/// comparable bit for bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapTargets {
    targets: Vec<usize>,
}

impl SwapTargets {
    /// Wrap a caller-provided table after checking every entry.
    ///
    /// # Errors
    /// [`SampleError::InvalidSwapTarget`] if some `targets[i]` is outside `[i, len)`.
    pub fn new(targets: Vec<usize>) -> Result<Self> {
        let len = targets.len();
        if let Some((index, &target)) = targets
            .iter()
            .enumerate()
            .find(|&(i, &t)| t < i || t >= len)
        {
            return Err(SampleError::InvalidSwapTarget { index, target, len });
        }
        Ok(Self { targets })
    }

}

impl Deref for SwapTargets {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.targets
    }
}

/// Draw `target(i)` uniformly from `[i, n)` for every `i`, in index order.
pub fn generate_swap_targets<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SwapTargets {
    let targets = (0..n).map(|i| rng.random_range(i..n)).collect();
    SwapTargets { targets }
}

/// Parallel counterpart of [`generate_swap_targets`].
///
/// `target(i)` comes from `keyed.at(i)`, so the table only depends on the
/// stream seed and `n`.
#[must_use]
pub fn par_generate_swap_targets(n: usize, keyed: &KeyedStream) -> SwapTargets {
    let targets = (0..n)
        .into_par_iter()
        .map(|i| keyed.at(i as u64).random_range(i..n))
        .collect();
    SwapTargets { targets }
}
