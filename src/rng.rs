//! Seedable random number generation for maze carving.
//!
//! Uses a seeded ChaCha RNG so generation is reproducible given a fixed
//! seed. There is no ambient process-wide source behind it; callers
//! construct one and thread it through the generator explicitly.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator's random source.
///
/// Wraps ChaCha8 and remembers the seed it was created with, so a
/// generated map can always be reproduced.
#[derive(Debug, Clone)]
pub struct MazeRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MazeRng {
    /// Creates a new RNG from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a new RNG with a seed drawn from process entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for MazeRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}
