//! Deterministic random numbers for the engines.
//!
//! Every generator and solver takes its RNG as an explicit argument, so a run is fully
//! reproducible from the seed. [`Pcg32`] is the minimal PCG32 (XSH RR) generator;
//! [`MazeRng`] adds the two operations the algorithms need on top of any [`RngCore`].

use rand::{RngCore, SeedableRng, rand_core::impls};

/// Minimal PCG32 generator: 64-bit state advanced by a fixed multiplier and an odd increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    const MULTIPLIER: u64 = 6364136223846793005;
    /// Seed used when the caller does not provide one.
    pub const DEFAULT_STATE: u64 = 123456789;
    pub const DEFAULT_INC: u64 = 987654321;

    pub fn new(state: u64, inc: u64) -> Self {
        Pcg32 { state, inc }
    }

    /// Reference generator when `seed` is `None`, otherwise one derived from `seed`.
    pub fn seeded(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Pcg32::seed_from_u64(s),
            None => Pcg32::default(),
        }
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        Pcg32::new(Pcg32::DEFAULT_STATE, Pcg32::DEFAULT_INC)
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old
            .wrapping_mul(Pcg32::MULTIPLIER)
            .wrapping_add(self.inc | 1);
        // XSH RR output function on the old state
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Pcg32 {
    /// State then increment, little endian.
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut inc = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        inc.copy_from_slice(&seed[8..]);
        Pcg32::new(u64::from_le_bytes(state), u64::from_le_bytes(inc))
    }
}

/// Integer range and shuffle as the maze algorithms use them.
pub trait MazeRng: RngCore {
    /// Uniform integer in `lo..=hi` (bounds are swapped if reversed).
    ///
    /// Computed as `lo + next % (hi - lo + 1)`, so it carries a small modulo bias.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
        match (hi - lo).checked_add(1) {
            Some(span) => lo + self.next_u32() % span,
            None => self.next_u32(),
        }
    }

    /// In-place Fisher–Yates over `i = n-1 down to 2`.
    ///
    /// The loop bound stops at 2, so positions 0 and 1 are only ever reached as swap
    /// targets and never swap with each other directly. Kept for replay compatibility.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (2..items.len()).rev() {
            let r = self.next_u32() as usize % i;
            items.swap(i, r);
        }
    }
}

impl<R: RngCore + ?Sized> MazeRng for R {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sequence() {
        let mut rng = Pcg32::default();
        let values: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
        assert_eq!(values, vec![0, 1940370760, 2335257997, 2603717795, 4067686166]);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Pcg32::seeded(Some(42));
        let mut b = Pcg32::seeded(Some(42));
        let mut c = Pcg32::seeded(Some(43));
        let xs: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        let zs: Vec<u32> = (0..16).map(|_| c.next_u32()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn test_from_seed_splits_state_and_increment() {
        let mut seed = [0u8; 16];
        seed[..8].copy_from_slice(&Pcg32::DEFAULT_STATE.to_le_bytes());
        seed[8..].copy_from_slice(&Pcg32::DEFAULT_INC.to_le_bytes());
        assert_eq!(Pcg32::from_seed(seed), Pcg32::default());
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let mut rng = Pcg32::default();
        let mut seen = [false; 4];
        for _ in 0..200 {
            let v = rng.range(3, 6);
            assert!((3..=6).contains(&v));
            seen[(v - 3) as usize] = true;
            let w = rng.range(6, 3);
            assert!((3..=6).contains(&w));
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(rng.range(7, 7), 7);
        // Full span does not overflow
        let _ = rng.range(0, u32::MAX);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = Pcg32::default();
        let mut items: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_leaves_short_slices_alone() {
        let mut rng = Pcg32::default();
        let before = rng.clone();
        let mut pair = [1, 2];
        rng.shuffle(&mut pair);
        assert_eq!(pair, [1, 2]);
        // No randomness consumed either
        assert_eq!(rng, before);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
    }
}
