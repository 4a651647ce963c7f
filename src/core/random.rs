//! Randomization primitives shared by the catalog, trial and training code
//!
//! Everything takes the RNG explicitly so a whole session is reproducible
//! from one seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Session random number generator
pub type SessionRng = ChaCha8Rng;

/// Create the session RNG, drawing a fresh seed when none is given.
///
/// Returns the seed actually used so it can be logged.
pub fn session_rng(seed: Option<u64>) -> (SessionRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// Returns 0 or 1 with equal probability
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..2)
}

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last position down, swapping each element with a
/// uniformly chosen position at or before it.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a fixed-size array literal and hand it back
pub fn shuffled<T, R: Rng + ?Sized, const N: usize>(rng: &mut R, mut items: [T; N]) -> [T; N] {
    shuffle(rng, &mut items);
    items
}
