//! `rand`-backed random source for offer sampling.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use starfall_core::RandomSource;

/// Session RNG: seeded for replays and tests, entropy-seeded otherwise.
#[derive(Debug, Clone)]
pub struct SessionRng {
    inner: StdRng,
}

impl SessionRng {
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { inner }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl RandomSource for SessionRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
