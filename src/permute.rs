//! In-place partial Fisher–Yates permutation, sequential and lock-free parallel.
//!
//! [`permute`] applies swaps `0..k` strictly in order and is the reference.
//! [`par_permute`] applies the same logical swap sequence with rayon workers
//! and produces the identical array for any thread count or batch divisor.
//!
//! # Reserve/commit rounds
//!
//! Every array cell has a reservation slot holding either the index of a
//! pending swap or the sentinel `n`. Pending swaps are kept sorted by index and
//! processed in rounds over a prefix (the batch) of that list:
//!
//! 1. **Reserve**: each swap `i` in the batch lowers the slots of cells `i` and
//!    `target(i)` to `min(slot, i)`.
//! 2. **Commit**: swap `i` commits only if it owns both slots. It then swaps the
//!    two cells and resets the slot of `target(i)` to `n`. Losers stay pending.
//!
//! The smallest pending index always owns both of its cells, so every round
//! commits at least one swap. A swap only commits once every lower-indexed
//! swap touching its cells has committed, which yields the sequential result.

use crate::error::{Result, SampleError, check_sample_size};
use crate::swaps::SwapTargets;
use log::{debug, trace};
use rayon::prelude::*;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default divisor used to size each round's batch: `max(pending / D, D)`.
pub const DEFAULT_BATCH_DIVISOR: usize = 100;

/// Bookkeeping from one [`par_permute_with`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermuteStats {
    /// Reserve/commit rounds executed.
    pub rounds: usize,
    /// Swap attempts over all rounds (committed or not).
    pub attempts: usize,
    /// Swaps committed; always equals `k`.
    pub commits: usize,
}

impl PermuteStats {
    /// Attempts that lost a race and had to be retried.
    #[must_use]
    pub const fn retries(&self) -> usize {
        self.attempts - self.commits
    }
}

fn check_table(len: usize, k: usize, targets: &SwapTargets) -> Result<()> {
    check_sample_size(len, k)?;
    if targets.len() != len {
        return Err(SampleError::SwapTableLength {
            expected: len,
            actual: targets.len(),
        });
    }
    Ok(())
}

/// Apply the first `k` swaps of `targets` to `arr`, in increasing index order.
///
/// Afterwards `arr[..k]` is a uniformly random ordered `k`-subset when the
/// table was drawn uniformly.
///
/// # Errors
/// [`SampleError::InvalidSampleSize`] if `k > arr.len()`,
/// [`SampleError::SwapTableLength`] if the table does not match `arr`.
pub fn permute<T>(arr: &mut [T], k: usize, targets: &SwapTargets) -> Result<()> {
    check_table(arr.len(), k, targets)?;
    for (i, &target) in targets[..k].iter().enumerate() {
        arr.swap(i, target);
    }
    Ok(())
}

/// Parallel [`permute`] with [`DEFAULT_BATCH_DIVISOR`].
///
/// # Errors
/// Same as [`permute`].
pub fn par_permute<T: Send>(
    arr: &mut [T],
    k: usize,
    targets: &SwapTargets,
) -> Result<PermuteStats> {
    par_permute_with(arr, k, targets, DEFAULT_BATCH_DIVISOR)
}

/// Parallel [`permute`] with an explicit batch divisor.
///
/// The divisor only trades parallelism against wasted retries; the resulting
/// array does not depend on it. A divisor of `0` is treated as `1`.
///
/// # Errors
/// Same as [`permute`].
pub fn par_permute_with<T: Send>(
    arr: &mut [T],
    k: usize,
    targets: &SwapTargets,
    batch_divisor: usize,
) -> Result<PermuteStats> {
    check_table(arr.len(), k, targets)?;
    let n = arr.len();
    let divisor = batch_divisor.max(1);

    let reservations: Vec<AtomicUsize> =
        (0..n).into_par_iter().map(|_| AtomicUsize::new(n)).collect();
    let cells = SharedSlice::new(arr);

    let try_commit = |i: usize| -> bool {
        let target = targets[i];
        if reservations[i].load(Ordering::Relaxed) != i
            || reservations[target].load(Ordering::Relaxed) != i
        {
            return false;
        }
        // SAFETY: `i` owns the slots of both cells for this round; any other
        // swap touching either cell sees a slot value different from its own
        // index and does not write.
        unsafe { cells.swap(i, target) };
        reservations[target].store(n, Ordering::Relaxed);
        true
    };

    let mut stats = PermuteStats::default();
    let mut pending: Vec<usize> = (0..k).collect();

    while !pending.is_empty() {
        let batch_len = (pending.len() / divisor).max(divisor).min(pending.len());
        let (batch, rest) = pending.split_at(batch_len);

        // Phases are separated by the joins at the end of each parallel loop,
        // so relaxed ordering is enough on the slots.
        batch.par_iter().for_each(|&i| {
            reserve(&reservations[i], i);
            reserve(&reservations[targets[i]], i);
        });
        let mut next: Vec<usize> = batch
            .par_iter()
            .copied()
            .filter(|&i| !try_commit(i))
            .collect();

        let committed = batch_len - next.len();
        stats.rounds += 1;
        stats.attempts += batch_len;
        stats.commits += committed;
        trace!(
            "permute round {}: batch {batch_len}, committed {committed}, pending {}",
            stats.rounds,
            next.len() + rest.len()
        );

        next.extend_from_slice(rest);
        pending = next;
    }

    debug!(
        "par_permute n={n} k={k} divisor={divisor}: {} rounds, {} retries",
        stats.rounds,
        stats.retries()
    );
    Ok(stats)
}

/// Atomic fetch-and-min via a compare-and-swap loop.
#[inline]
fn reserve(slot: &AtomicUsize, index: usize) {
    let mut current = slot.load(Ordering::Relaxed);
    while index < current {
        match slot.compare_exchange_weak(current, index, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(actual) => current = actual,
        }
    }
}

/// Shared view of a mutable slice for the commit phase.
///
/// Only exposes `swap`; callers must guarantee no two threads touch the same
/// cell concurrently.
struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: access goes through `swap`, whose contract forbids concurrent use of
// a cell; moving `T` values between threads needs `T: Send`.
unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send> Sync for SharedSlice<'_, T> {}

impl<'a, T> SharedSlice<'a, T> {
    fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// No other thread may access cells `a` or `b` during the call.
    #[inline]
    unsafe fn swap(&self, a: usize, b: usize) {
        assert!(a < self.len && b < self.len, "swap out of bounds");
        // SAFETY: both indices are in bounds; `ptr::swap` allows `a == b`.
        unsafe { std::ptr::swap(self.ptr.add(a), self.ptr.add(b)) };
    }
}
