//! Deterministic random number generation.
//!
//! Every random choice in a match (deck filling, shuffling, revive target,
//! random-effect selection) goes through a [`RandomSource`]. Matches use
//! [`GameRng`]; tests can substitute [`ScriptedRandom`] to force outcomes.
//!
//! ```
//! use duel_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! // Same seed, same sequence
//! assert_eq!(a.pick(10), b.pick(10));
//! ```

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random choices.
pub trait RandomSource {
    /// Pick an index uniformly in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        // Fisher-Yates driven by `pick`, so scripted sources shuffle too.
        for i in (1..slice.len()).rev() {
            let j = self.pick(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// Keeps randomness domains apart (deck building vs. in-match effects),
    /// so adding a card to a deck does not shift every later revive pick.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Random source that replays a fixed list of picks.
///
/// Each pick is reduced modulo `len`. Once the script runs out it always
/// picks index 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Create a source that returns `picks` in order.
    #[must_use]
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Number of scripted picks left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().map_or(0, |p| p % len)
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
            assert_eq!(rng1.pick(1000), rng2.pick(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.pick(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.pick(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("decks");
        let mut ctx2 = rng.for_context("effects");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.pick(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.pick(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = GameRng::new(42).for_context("test");
        let mut ctx2 = GameRng::new(42).for_context("test");

        for _ in 0..10 {
            assert_eq!(ctx1.pick(1000), ctx2.pick(1000));
        }
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        RandomSource::shuffle(&mut rng, &mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_scripted_picks() {
        let mut rng = ScriptedRandom::new([2, 7, 1]);

        assert_eq!(rng.pick(5), 2);
        assert_eq!(rng.pick(5), 2); // 7 % 5
        assert_eq!(rng.pick(5), 1);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.pick(5), 0);
    }

    #[test]
    fn test_scripted_shuffle_is_permutation() {
        let mut rng = ScriptedRandom::new([0, 0, 0]);
        let mut data = vec![1, 2, 3, 4];

        rng.shuffle(&mut data);

        let mut sorted = data.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }
}
