use anyhow::Result;
use clap::Parser;
use parsample::Strategy;
use parsample::harness::{BenchConfig, run_benchmark, write_records_csv, write_records_json};
use std::path::PathBuf;

/// Time every sampling strategy and write the results as CSV.
#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    /// Number of input elements.
    #[clap(short, long, default_value_t = 1_000_000)]
    n: usize,

    /// Worker threads (defaults to all cores).
    #[clap(short, long)]
    threads: Option<usize>,

    /// Repetitions per (strategy, k).
    #[clap(short, long, default_value_t = 3)]
    repeats: usize,

    /// Base seed.
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Sample sizes; defaults to 10/25/50/75/90 % of n.
    #[clap(short, long = "k")]
    ks: Vec<usize>,

    /// Strategies to run; defaults to all of them.
    #[clap(short, long = "strategy")]
    strategies: Vec<Strategy>,

    /// Output CSV path.
    #[clap(short, long, default_value = "analysis/results.csv")]
    output: PathBuf,

    /// Also write the records as JSON next to the CSV.
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = BenchConfig::new(cli.n);
    config.threads = cli.threads;
    config.repeats = cli.repeats;
    config.seed = cli.seed;
    if !cli.ks.is_empty() {
        config.ks = cli.ks;
    }
    if !cli.strategies.is_empty() {
        config.strategies = cli.strategies;
    }

    let records = run_benchmark(&config)?;
    let written = write_records_csv(&cli.output, &records)?;
    println!("Wrote {written} records to {}", cli.output.display());

    if cli.json {
        let json_path = cli.output.with_extension("json");
        write_records_json(&json_path, &records)?;
        println!("Wrote JSON to {}", json_path.display());
    }
    Ok(())
}
