//! Benchmark harness: time strategies and record the results.
//!
//! This module provides:
//! - [`BenchConfig`]: problem size, `k` ladder, repeats, thread count, seed
//! - [`run_benchmark`]: runs every strategy per `(k, repeat)` on one rayon pool
//! - [`write_records_csv`] / [`read_records_csv`]: Serde-backed CSV records
//! - [`write_records_json`]: the same records as a JSON array
//!
//! Records carry the columns `algorithm, threads, n, k, rep, dtype, time_us`.

use crate::sampler::{Sampler, Strategy};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Percentages of `n` used for the default `k` ladder.
pub const K_PERCENTAGES: [usize; 5] = [10, 25, 50, 75, 90];

/// What to benchmark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub n: usize,
    pub ks: Vec<usize>,
    pub repeats: usize,
    /// Worker threads for the pool; all available cores when `None`.
    pub threads: Option<usize>,
    /// Base seed; repeat `r` uses `seed + r`.
    pub seed: u64,
    pub strategies: Vec<Strategy>,
}

impl BenchConfig {
    /// All strategies over the default `k` ladder for `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ks: Self::ks_for(n),
            repeats: 3,
            threads: None,
            seed: 0,
            strategies: Strategy::ALL.to_vec(),
        }
    }

    /// `k` values at [`K_PERCENTAGES`] of `n`.
    #[must_use]
    pub fn ks_for(n: usize) -> Vec<usize> {
        K_PERCENTAGES.iter().map(|p| n * p / 100).collect()
    }

    /// Thread count the run will report.
    #[must_use]
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// One timed sampler call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchRecord {
    pub algorithm: String,
    pub threads: usize,
    pub n: usize,
    pub k: usize,
    pub rep: usize,
    pub dtype: String,
    pub time_us: u64,
}

/// Run the configured benchmark and return one record per sampler call.
///
/// Input data is `0..n` as `i32`. Every call runs inside a single dedicated
/// pool so pool construction is not timed.
///
/// # Errors
/// Returns an error if the pool cannot be built, if a `k` exceeds `n`, or if
/// `n` does not fit in `i32`.
pub fn run_benchmark(config: &BenchConfig) -> Result<Vec<BenchRecord>> {
    let threads = config.resolved_threads();
    let upper = i32::try_from(config.n).context("benchmark size must fit in i32")?;
    let data: Vec<i32> = (0..upper).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("build benchmark thread pool")?;

    let bench_start = Instant::now();
    let records = pool.install(|| -> Result<Vec<BenchRecord>> {
        let mut records = Vec::new();
        for &k in &config.ks {
            info!("Benchmarking with k = {k}");
            for rep in 0..config.repeats {
                for &strategy in &config.strategies {
                    let sampler = Sampler::new(strategy).with_seed(config.seed.wrapping_add(rep as u64));
                    let start = Instant::now();
                    let sample = sampler
                        .sample(&data, k)
                        .with_context(|| format!("{strategy} with k = {k}"))?;
                    let elapsed = start.elapsed();
                    debug_assert_eq!(sample.len(), k);

                    records.push(BenchRecord {
                        algorithm: strategy.name().to_string(),
                        threads,
                        n: config.n,
                        k,
                        rep,
                        dtype: "i32".to_string(),
                        time_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
                    });
                }
            }
        }
        Ok(records)
    })?;

    info!(
        "Benchmark took a total of {} seconds",
        bench_start.elapsed().as_secs()
    );
    Ok(records)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    Ok(())
}

/// Write records to a CSV file with a header row.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or a row fails to
/// serialize/flush.
pub fn write_records_csv(path: impl AsRef<Path>, records: &[BenchRecord]) -> Result<usize> {
    let path = path.as_ref();
    create_parent(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(f);
    for (i, row) in records.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Read records back from a CSV file written by [`write_records_csv`].
///
/// # Errors
/// Returns an error if the file cannot be opened or a row fails to parse.
pub fn read_records_csv(path: impl AsRef<Path>) -> Result<Vec<BenchRecord>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(f);
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<BenchRecord>().enumerate() {
        out.push(rec.with_context(|| format!("parse CSV record #{}", i + 1))?);
    }
    Ok(out)
}

/// Write records as a pretty-printed JSON array.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_records_json(path: impl AsRef<Path>, records: &[BenchRecord]) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let json = serde_json::to_string_pretty(records)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}
