//! String-seeded deterministic RNG and compound dice.
//!
//! Every roll constructs its own [`SeededRng`]; there is no shared or
//! process-wide random state. The same seed string always reproduces the
//! same draw sequence, which is what makes roll replay from session logs
//! possible.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// A deterministic random source keyed by a seed string.
#[derive(Debug)]
pub struct SeededRng {
    seed: String,
    rng: StdRng,
}

impl SeededRng {
    /// Create an RNG from an optional seed. When `None`, a fresh UUIDv4
    /// seed is generated (and reported by [`SeededRng::seed`], so the roll
    /// can still be replayed).
    pub fn new(seed: Option<String>) -> Self {
        let seed = seed.unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        Self {
            rng: StdRng::seed_from_u64(hasher.finish()),
            seed,
        }
    }

    /// Create an RNG from a fixed seed string.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self::new(Some(seed.into()))
    }

    /// The seed string driving this generator.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// A random float in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.random()
    }

    /// A uniform integer in `min..=max`. Panics if `min > max` (caller
    /// error, deliberately unguarded).
    pub fn int(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// Roll a d66: two d6 combined as tens and ones.
    ///
    /// Values come from the sparse set {11..16, 21..26, ..., 61..66} —
    /// physical two-die notation, never 17..20 and the like.
    pub fn d66(&mut self) -> u32 {
        let tens = self.int(1, 6);
        let ones = self.int(1, 6);
        tens * 10 + ones
    }

    /// Roll a d88: two d8 combined as tens and ones (11..18, 21..28, ...).
    pub fn d88(&mut self) -> u32 {
        let tens = self.int(1, 8);
        let ones = self.int(1, 8);
        tens * 10 + ones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::from_seed("campaign-night-3");
        let mut b = SeededRng::from_seed("campaign-night-3");
        for _ in 0..50 {
            assert_eq!(a.int(1, 100), b.int(1, 100));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::from_seed("alpha");
        let mut b = SeededRng::from_seed("beta");
        let draws_a: Vec<u32> = (0..20).map(|_| a.int(1, 1000)).collect();
        let draws_b: Vec<u32> = (0..20).map(|_| b.int(1, 1000)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn generated_seed_is_reported() {
        let rng = SeededRng::new(None);
        assert!(!rng.seed().is_empty());
    }

    #[test]
    fn generated_seed_is_replayable() {
        let mut first = SeededRng::new(None);
        let seed = first.seed().to_string();
        let draws: Vec<u32> = (0..10).map(|_| first.int(1, 100)).collect();
        let mut replay = SeededRng::from_seed(seed);
        let replayed: Vec<u32> = (0..10).map(|_| replay.int(1, 100)).collect();
        assert_eq!(draws, replayed);
    }

    #[test]
    fn random_stays_in_unit_interval() {
        let mut rng = SeededRng::from_seed("unit");
        for _ in 0..1000 {
            let f = rng.random();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn int_is_inclusive_on_both_ends() {
        let mut rng = SeededRng::from_seed("bounds");
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..1000 {
            let v = rng.int(1, 4);
            assert!((1..=4).contains(&v));
            saw_min |= v == 1;
            saw_max |= v == 4;
        }
        assert!(saw_min && saw_max);
    }

    #[test]
    fn d66_stays_in_sparse_set() {
        let mut rng = SeededRng::from_seed("d66");
        for _ in 0..1000 {
            let v = rng.d66();
            let tens = v / 10;
            let ones = v % 10;
            assert!((1..=6).contains(&tens), "bad tens in {v}");
            assert!((1..=6).contains(&ones), "bad ones in {v}");
        }
    }

    #[test]
    fn d88_stays_in_sparse_set() {
        let mut rng = SeededRng::from_seed("d88");
        for _ in 0..1000 {
            let v = rng.d88();
            let tens = v / 10;
            let ones = v % 10;
            assert!((1..=8).contains(&tens), "bad tens in {v}");
            assert!((1..=8).contains(&ones), "bad ones in {v}");
        }
    }
}
