//! Strategy selection and execution settings.
//!
//! [`Sampler`] bundles a [`Strategy`] with a seed, an [`ExecMode`] and the
//! permuter batch divisor, and exposes every strategy through one call:
//! `sampler.sample(&data, k)`.

use crate::error::{Result, SampleError, check_sample_size};
use crate::permute::DEFAULT_BATCH_DIVISOR;
use crate::rng::{KeyedStream, SplitMix64};
use crate::samplers::{
    naive_sample, par_permutation_full_sample, par_permutation_sample, par_priority_sample,
    seq_permutation_sample, seq_priority_sample, sparse_permutation_sample,
};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available sampling strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Naive,
    SeqPriority,
    ParPriority,
    SeqPermutation,
    SparsePermutation,
    ParPermutation,
    ParPermutationFull,
}

impl Strategy {
    pub const ALL: [Self; 7] = [
        Self::Naive,
        Self::SeqPriority,
        Self::ParPriority,
        Self::SeqPermutation,
        Self::SparsePermutation,
        Self::ParPermutation,
        Self::ParPermutationFull,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Naive => "Naive",
            Self::SeqPriority => "SeqPriority",
            Self::ParPriority => "ParPriority",
            Self::SeqPermutation => "SeqPermutation",
            Self::SparsePermutation => "SparsePermutation",
            Self::ParPermutation => "ParPermutation",
            Self::ParPermutationFull => "ParPermutationFull",
        }
    }

    /// Whether the strategy runs on the rayon pool.
    #[must_use]
    pub const fn is_parallel(self) -> bool {
        matches!(
            self,
            Self::ParPriority | Self::ParPermutation | Self::ParPermutationFull
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SampleError::UnknownStrategy(s.to_string()))
    }
}

/// How parallel strategies are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Run on a single worker thread.
    Sequential,
    /// Run on `threads` workers, or on the global rayon pool when `None`.
    Parallel { threads: Option<usize> },
}

impl Default for ExecMode {
    fn default() -> Self {
        Self::Parallel { threads: None }
    }
}

impl ExecMode {
    /// Worker count this mode resolves to; [`Sampler::sample`] sizes its pool with it.
    #[must_use]
    pub fn threads(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel { threads: Some(t) } => t.max(1),
            Self::Parallel { threads: None } => rayon::current_num_threads(),
        }
    }
}

/// A configured sampling strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    pub strategy: Strategy,
    /// Fixed seed for reproducible samples; fresh entropy per call when `None`.
    pub seed: Option<u64>,
    pub mode: ExecMode,
    /// Batch divisor for the parallel permuters.
    pub batch_divisor: usize,
}

impl Sampler {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            seed: None,
            mode: ExecMode::default(),
            batch_divisor: DEFAULT_BATCH_DIVISOR,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_threads(self, threads: usize) -> Self {
        self.with_mode(ExecMode::Parallel {
            threads: Some(threads),
        })
    }

    #[must_use]
    pub const fn with_batch_divisor(mut self, batch_divisor: usize) -> Self {
        self.batch_divisor = batch_divisor;
        self
    }

    /// Draw `k` elements of `data` without replacement.
    ///
    /// Sequential strategies consume a [`SplitMix64`] stream seeded with the
    /// configured seed, parallel ones a [`KeyedStream`] with that seed. The two
    /// families therefore draw different samples for the same seed, but each
    /// strategy is reproducible on its own.
    ///
    /// # Errors
    /// [`SampleError::InvalidSampleSize`] if `k > data.len()`, checked before
    /// any pool is built or random value drawn; [`SampleError::ThreadPool`] if
    /// a dedicated pool cannot be created.
    pub fn sample<T: Clone + Send + Sync>(&self, data: &[T], k: usize) -> Result<Vec<T>> {
        check_sample_size(data.len(), k)?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        debug!(
            "{} sampling k={k} of n={} (seed {seed}, {:?})",
            self.strategy,
            data.len(),
            self.mode
        );

        match self.dedicated_pool()? {
            Some(pool) => pool.install(|| self.dispatch(data, k, seed)),
            None => self.dispatch(data, k, seed),
        }
    }

    /// Pool sized by [`ExecMode::threads`], or `None` to run on the caller's pool.
    ///
    /// Sequential strategies and `Parallel { threads: None }` never get one.
    fn dedicated_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        if !self.strategy.is_parallel() || self.mode == ExecMode::default() {
            return Ok(None);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.mode.threads())
            .build()?;
        Ok(Some(pool))
    }

    fn dispatch<T: Clone + Send + Sync>(&self, data: &[T], k: usize, seed: u64) -> Result<Vec<T>> {
        let keyed = KeyedStream::new(seed);
        let mut rng = SplitMix64::new(seed);
        match self.strategy {
            Strategy::Naive => naive_sample(data, k, &mut rng),
            Strategy::SeqPriority => seq_priority_sample(data, k, &mut rng),
            Strategy::ParPriority => par_priority_sample(data, k, &keyed),
            Strategy::SeqPermutation => seq_permutation_sample(data, k, &mut rng),
            Strategy::SparsePermutation => sparse_permutation_sample(data, k, &mut rng),
            Strategy::ParPermutation => {
                par_permutation_sample(data, k, &keyed, self.batch_divisor)
            }
            Strategy::ParPermutationFull => {
                par_permutation_full_sample(data, k, &keyed, self.batch_divisor)
            }
        }
    }
}
