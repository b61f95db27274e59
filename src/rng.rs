//! Injectable randomness.
//!
//! Every nondeterministic decision in the engine (shuffles, the opportunistic
//! wild roll, color tie-breaks) goes through [`RandomSource`], so a game driven
//! by a seeded source replays identically.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::card::Card;

/// Randomness consumed by the engine and by selection policies.
pub trait RandomSource {
    /// Shuffle the cards in place.
    fn shuffle(&mut self, cards: &mut [Card]);

    /// Uniformly pick an index in `0..len`. `len` must be non-zero.
    fn uniform_choice(&mut self, len: usize) -> usize;

    /// Returns true with probability `p` (clamped to `0.0..=1.0`).
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(self);
    }

    fn uniform_choice(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "uniform_choice requires a non-empty range");
        self.gen_range(0..len.max(1))
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Default source backing a game built from a seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
