//! Explicit random streams.
//!
//! Two flavours are provided and nothing in the crate touches a process-wide
//! generator:
//!
//! - [`SplitMix64`]: a tiny sequential generator. Seeding it with the same
//!   `u64` replays the exact same stream, which is what the sequential
//!   priority sampler relies on for its second pass.
//! - [`KeyedStream`]: an index-addressable family of generators. The value
//!   drawn for index `i` is a pure function of `(seed, i)`, so parallel loops
//!   get identical draws regardless of thread count or scheduling.

use rand::{RngCore, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 output finalizer (Stafford variant 13).
#[inline]
const fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// SplitMix64 generator.
///
/// Implements [`RngCore`] and [`SeedableRng`] so the whole `rand::Rng`
/// surface (`random`, `random_range`, ...) is available on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Stream starting from `seed`. Equal seeds give equal streams.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    const fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

impl RngCore for SplitMix64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut chunks = dst.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next().to_le_bytes());
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let bytes = self.next().to_le_bytes();
            rest.copy_from_slice(&bytes[..rest.len()]);
        }
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    // Stored verbatim so a captured u64 seed replays the stream exactly.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Index-addressable random stream.
///
/// `stream.at(i)` hands out a fresh generator for index `i`. No state is
/// shared between indices, so a `KeyedStream` is freely `Copy` and `Sync`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyedStream {
    seed: u64,
}

impl KeyedStream {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed this stream was built from; derived streams report their own.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator for position `index`.
    #[inline]
    #[must_use]
    pub const fn at(&self, index: u64) -> SplitMix64 {
        SplitMix64::new(mix64(self.seed ^ mix64(index.wrapping_mul(GOLDEN_GAMMA))))
    }

    /// Independent stream for another purpose (`tag`) under the same seed.
    ///
    /// Used so swap targets, priorities and pivots drawn for one sampler call
    /// never share draws.
    #[must_use]
    pub const fn derive(&self, tag: u64) -> Self {
        Self::new(mix64(self.seed.wrapping_add(tag.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_replays_stream() {
        let mut a = SplitMix64::seed_from_u64(42);
        let mut b = SplitMix64::seed_from_u64(42);
        let xs: Vec<u64> = (0..100).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..100).map(|_| b.next_u64()).collect();
        assert_eq!(xs, ys);

        let mut c = SplitMix64::seed_from_u64(43);
        let zs: Vec<u64> = (0..100).map(|_| c.next_u64()).collect();
        assert_ne!(xs, zs);
    }

    #[test]
    fn from_seed_matches_seed_from_u64() {
        let a = SplitMix64::from_seed(7u64.to_le_bytes());
        let b = SplitMix64::seed_from_u64(7);
        assert_eq!(a, b);
    }

    #[test]
    fn fill_bytes_handles_tail() {
        let mut rng = SplitMix64::new(1);
        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);
        let mut again = SplitMix64::new(1);
        assert_eq!(&buf[..8], &again.next_u64().to_le_bytes());
        assert_eq!(&buf[8..], &again.next_u64().to_le_bytes()[..5]);
    }

    #[test]
    fn keyed_draws_ignore_visit_order() {
        let keyed = KeyedStream::new(99);
        let forward: Vec<u64> = (0..64).map(|i| keyed.at(i).next_u64()).collect();
        let mut backward: Vec<u64> = (0..64).rev().map(|i| keyed.at(i).next_u64()).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn derived_streams_differ() {
        let keyed = KeyedStream::new(5);
        let a = keyed.derive(0).at(0).next_u64();
        let b = keyed.derive(1).at(0).next_u64();
        let c = keyed.at(0).next_u64();
        assert_ne!(a, b);
        assert_ne!(a, c);

        assert_eq!(keyed.seed(), 5);
        assert_ne!(keyed.derive(1).seed(), keyed.seed());
        assert_eq!(KeyedStream::new(keyed.derive(1).seed()), keyed.derive(1));
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = SplitMix64::new(3);
        for i in 0..1000usize {
            let x = rng.random_range(i..1000 + i);
            assert!((i..1000 + i).contains(&x));
        }
    }
}
