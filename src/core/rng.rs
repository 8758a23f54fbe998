//! Injectable randomness for role assignment.
//!
//! ## Key Features
//!
//! - **Injectable**: handlers draw from an [`IndexSource`], never a global
//! - **Deterministic**: the same seed produces the same sequence
//! - **Scriptable**: [`FixedIndices`] replays a fixed sequence in tests
//!
//! ## Usage
//!
//! ```
//! use just_one::core::{FixedIndices, GameRng, IndexSource};
//!
//! let mut rng = GameRng::new(42);
//! let pick = rng.next_index(5);
//! assert!(pick < 5);
//!
//! // Same seed, same picks
//! let mut again = GameRng::new(42);
//! assert_eq!(again.next_index(5), pick);
//!
//! // Scripted picks wrap into range
//! let mut fixed = FixedIndices::new([1, 7]);
//! assert_eq!(fixed.next_index(3), 1);
//! assert_eq!(fixed.next_index(3), 1);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed indices.
pub trait IndexSource {
    /// Draw an index in `0..bound`. `bound` is always greater than zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Seedable RNG backing production role assignment.
///
/// Uses ChaCha8 for speed while keeping a reproducible stream per seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// The seed, if this RNG was created from one.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl IndexSource for GameRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Clone, Debug)]
pub struct FixedIndices {
    values: Vec<usize>,
    position: usize,
}

impl FixedIndices {
    /// Create from a sequence. An empty sequence always yields 0.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
            position: 0,
        }
    }
}

impl IndexSource for FixedIndices {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_index(1000), rng2.next_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_stays_in_bound() {
        let mut rng = GameRng::from_entropy();
        assert_eq!(rng.seed(), None);

        for bound in 1..20 {
            assert!(rng.next_index(bound) < bound);
        }
    }

    #[test]
    fn test_fixed_indices_cycle() {
        let mut fixed = FixedIndices::new([0, 2, 5]);

        assert_eq!(fixed.next_index(4), 0);
        assert_eq!(fixed.next_index(4), 2);
        assert_eq!(fixed.next_index(4), 1);
        assert_eq!(fixed.next_index(4), 0);
    }

    #[test]
    fn test_fixed_indices_empty() {
        let mut fixed = FixedIndices::new([]);
        assert_eq!(fixed.next_index(3), 0);
    }
}
