//! Deterministic random number generation.
//!
//! Wraps PCG (Permuted Congruential Generator) so that sampled restart
//! schedules are reproducible.
//!
//! # Reproducibility Guarantee
//!
//! Given the same seed, all random sequences (and therefore all sampled
//! restart schedules) are bitwise-identical across runs and platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SolverRng {
    /// Seed the generator was created from.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SolverRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in `[min, max)`. Bounds given in the wrong
    /// order are swapped.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        lo + (hi - lo) * self.gen_f64()
    }

    /// Generate a uniform index in `[0, max)`; returns 0 when `max == 0`.
    pub fn gen_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Property: Same seed produces same sequence.
    #[test]
    fn test_reproducibility() {
        let mut rng1 = SolverRng::new(42);
        let mut rng2 = SolverRng::new(42);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_eq!(seq1, seq2, "Same seed must produce identical sequences");
    }

    /// Property: Different seeds produce different sequences.
    #[test]
    fn test_different_seeds() {
        let mut rng1 = SolverRng::new(42);
        let mut rng2 = SolverRng::new(43);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_ne!(
            seq1, seq2,
            "Different seeds must produce different sequences"
        );
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = SolverRng::new(42);

        for _ in 0..1000 {
            let v = rng.gen_range_f64(-10.0, 10.0);
            assert!((-10.0..10.0).contains(&v), "Value out of range: {v}");
        }
    }

    #[test]
    fn test_range_swapped_bounds() {
        let mut rng = SolverRng::new(7);
        for _ in 0..100 {
            let v = rng.gen_range_f64(5.0, 1.0);
            assert!((1.0..5.0).contains(&v), "Value out of range: {v}");
        }
    }

    #[test]
    fn test_gen_index_bounds() {
        let mut rng = SolverRng::new(42);
        assert_eq!(rng.gen_index(0), 0);
        assert_eq!(rng.gen_index(1), 0);
        for _ in 0..1000 {
            assert!(rng.gen_index(7) < 7);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SolverRng::new(42);
        let mut items: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted, "50 items should not shuffle to identity");
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = SolverRng::new(1);
        let mut empty: Vec<usize> = Vec::new();
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9];
        rng.shuffle(&mut single);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_seed_accessor_and_clone() {
        let mut rng = SolverRng::new(42);
        let _ = rng.gen_f64();
        let mut cloned = rng.clone();
        assert_eq!(cloned.seed(), 42);
        assert_eq!(cloned.gen_index(1000), rng.gen_index(1000));
    }
}
