//! Deterministic random number generation for environment sampling.
//!
//! The controller owns one `GameRng` and reseeds it on every `reset`, so a
//! seeded episode always samples the same actions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose a random element from an exact-size iterator without
    /// collecting it.
    ///
    /// ```
    /// use power_chess_env::core::GameRng;
    ///
    /// let mut rng = GameRng::new(42);
    /// let picked = rng.choose_iter([3, 9, 27]).unwrap();
    /// assert!([3, 9, 27].contains(&picked));
    /// ```
    pub fn choose_iter<I>(&mut self, iter: I) -> Option<I::Item>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let len = iter.len();
        if len == 0 {
            return None;
        }
        iter.nth(self.inner.gen_range(0..len))
    }
}
