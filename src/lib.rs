//! # parsample
//!
//! **Uniform sampling without replacement** for Rust: draw `k` of `n` elements
//! with several algorithmically distinct strategies, each available in a
//! sequential and (where it makes sense) a rayon-parallel form.
//!
//! ## Key Features
//!
//! - **Permutation sampling** - partial Fisher–Yates shuffle, including a lock-free
//!   parallel permuter that reproduces the sequential result exactly
//! - **Priority sampling** - keep the `k` smallest random priorities, with a
//!   parallel order-statistic selection and filter
//! - **Naive rejection sampling** - a baseline for comparison
//! - **Explicit randomness** - samplers take their generator as an argument;
//!   sequential streams are replayable by seed, parallel streams are keyed by index
//! - **Benchmark harness** - CSV timing records and the `sample-bench` binary
//!   (feature `harness`)
//!
//! ## Quick Start
//!
//! ```
//! use parsample::{Sampler, Strategy};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data: Vec<u32> = (1..=9).collect();
//! let sample = Sampler::new(Strategy::ParPermutation)
//!     .with_seed(42)
//!     .sample(&data, 3)?;
//! assert_eq!(sample.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Sequential / parallel equivalence
//!
//! Given the same [`SwapTargets`] table, [`par_permute`] and [`permute`](fn@permute) leave
//! the array in the same state, for any thread count and batch divisor:
//!
//! ```
//! use parsample::{KeyedStream, par_generate_swap_targets, par_permute, permute};
//!
//! # fn main() -> anyhow::Result<()> {
//! let targets = par_generate_swap_targets(10_000, &KeyedStream::new(7));
//! let mut seq: Vec<u32> = (0..10_000).collect();
//! let mut par = seq.clone();
//! permute(&mut seq, 10_000, &targets)?;
//! par_permute(&mut par, 10_000, &targets)?;
//! assert_eq!(seq, par);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`rng`] - [`SplitMix64`] sequential stream and [`KeyedStream`]
//! - [`swaps`] - swap target tables
//! - [`permute`](mod@permute) - sequential and reserve/commit parallel permuters
//! - [`priority`] / [`select`] - priority tables and k-th smallest selection
//! - [`samplers`] - the sampling strategies as plain functions
//! - [`sampler`] - [`Strategy`], [`ExecMode`] and the [`Sampler`] front end
//! - `harness` - benchmark records and CSV output (feature `harness`)

pub mod error;
pub mod permute;
pub mod priority;
pub mod rng;
pub mod sampler;
pub mod samplers;
pub mod select;
pub mod swaps;

#[cfg(feature = "harness")]
pub mod harness;

pub use error::{Result, SampleError};
pub use permute::{DEFAULT_BATCH_DIVISOR, PermuteStats, par_permute, par_permute_with, permute};
pub use rng::{KeyedStream, SplitMix64};
pub use sampler::{ExecMode, Sampler, Strategy};
pub use samplers::{
    PrioritySelection, naive_sample, par_permutation_full_sample, par_permutation_sample,
    par_priority_sample, par_priority_select, seq_permutation_sample, seq_priority_sample,
    seq_priority_select, sparse_permutation_sample,
};
pub use select::{kth_smallest, par_kth_smallest};
pub use swaps::{SwapTargets, generate_swap_targets, par_generate_swap_targets};
