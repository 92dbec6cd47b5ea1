//! Sampling strategies.
//!
//! Every strategy is a function from `(data, k, randomness)` to a `Vec<T>` of
//! exactly `k` elements, rejecting `k > data.len()` before drawing anything.
//!
//! - [`naive`]: rejection sampling into a set of picked indices (baseline)
//! - [`priority`]: k smallest random priorities, sequential and parallel
//! - [`permutation`]: partial Fisher–Yates, sequential, sparse and parallel

pub mod naive;
pub mod permutation;
pub mod priority;

pub use naive::naive_sample;
pub use permutation::{
    par_permutation_full_sample, par_permutation_sample, seq_permutation_sample,
    sparse_permutation_sample,
};
pub use priority::{
    PrioritySelection, par_priority_sample, par_priority_select, seq_priority_sample,
    seq_priority_select,
};
