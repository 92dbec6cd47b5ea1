use anyhow::Result;
use parsample::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn pool(threads: usize) -> Result<rayon::ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?)
}

#[test]
fn parallel_matches_sequential_on_any_pool() -> Result<()> {
    let n = 10_000;
    for seed in 0..5 {
        let targets = generate_swap_targets(n, &mut ChaCha8Rng::seed_from_u64(seed));
        for k in [0, 1, 100, 5_000, n] {
            let mut expected: Vec<u32> = (0..n as u32).collect();
            permute(&mut expected, k, &targets)?;

            for threads in [1, 4] {
                for divisor in [1, 3, 100, 1_000] {
                    let mut got: Vec<u32> = (0..n as u32).collect();
                    let stats =
                        pool(threads)?.install(|| par_permute_with(&mut got, k, &targets, divisor))?;
                    assert_eq!(got, expected, "seed={seed} k={k} threads={threads} divisor={divisor}");
                    assert_eq!(stats.commits, k);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn keyed_targets_are_thread_independent() -> Result<()> {
    let keyed = KeyedStream::new(2024);
    let one = pool(1)?.install(|| par_generate_swap_targets(50_000, &keyed));
    let four = pool(4)?.install(|| par_generate_swap_targets(50_000, &keyed));
    assert_eq!(one, four);
    assert!(one.iter().enumerate().all(|(i, &t)| (i..50_000).contains(&t)));
    Ok(())
}

#[test]
fn heavy_contention_still_converges() -> Result<()> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();

    // Every swap aims at the last cell.
    let n = 2_000;
    let targets = SwapTargets::new(vec![n - 1; n])?;
    let mut seq: Vec<usize> = (0..n).collect();
    let mut par = seq.clone();
    permute(&mut seq, n, &targets)?;
    let stats = pool(4)?.install(|| par_permute_with(&mut par, n, &targets, 1))?;
    assert_eq!(seq, par);
    assert!(stats.rounds > 1);
    assert!(stats.retries() > 0);
    Ok(())
}

#[test]
fn full_run_prefix_equals_k_limited_run() -> Result<()> {
    let n = 10_000;
    let targets = par_generate_swap_targets(n, &KeyedStream::new(5));
    for k in [0, 10, 2_500, 9_999] {
        let mut partial: Vec<u32> = (0..n as u32).collect();
        let mut full = partial.clone();
        par_permute(&mut partial, k, &targets)?;
        par_permute(&mut full, n, &targets)?;
        assert_eq!(partial[..k], full[..k], "k={k}");
    }
    Ok(())
}

#[test]
fn malformed_tables_are_rejected() {
    assert!(matches!(
        SwapTargets::new(vec![1, 0]),
        Err(SampleError::InvalidSwapTarget { index: 1, target: 0, len: 2 })
    ));

    let targets = par_generate_swap_targets(4, &KeyedStream::new(0));
    let mut xs = [0u8; 5];
    assert!(matches!(
        par_permute(&mut xs, 2, &targets),
        Err(SampleError::SwapTableLength { expected: 5, actual: 4 })
    ));
}
