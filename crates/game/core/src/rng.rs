//! Random source abstraction for offer sampling.
//!
//! The core never reaches for ambient randomness: callers hand in a
//! [`RandomSource`]. [`PcgRandom`] gives a deterministic, seedable source for
//! tests and replays; hosts may adapt any other generator.

/// Uniform random source.
pub trait RandomSource {
    /// Next uniformly distributed 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..bound`. Returns 0 when `bound` is 0.
    ///
    /// Uses rejection sampling, so there is no modulo bias.
    fn below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        // Largest multiple of `bound` that fits in u32 space.
        let zone = u32::MAX - (u32::MAX % bound);
        loop {
            let value = self.next_u32();
            if value < zone {
                return value % bound;
            }
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Fisher–Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRandom {
    state: u64,
}

impl PcgRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRandom {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}
