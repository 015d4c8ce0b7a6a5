//! Deterministic pseudo-random numbers for procedural generation.
//!
//! Every render stage constructs its own [`SeededRandom`] from the request seed and threads it
//! through its draw program by `&mut`. There is no shared or global generator: two generation
//! calls never observe each other's state.

/// A source of uniformly distributed numbers in `[0, 1)`.
///
/// Synthesizers are written against this trait so tests can script exact sequences.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// Integer in `[min, max]`, both ends inclusive.
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let span = f64::from(max) - f64::from(min) + 1.0;
        (self.next() * span).floor() as i32 + min
    }

    /// Float in `[min, max)`.
    fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }
}

/// Mulberry32 generator: a 32-bit additive state passed through a multiply-xorshift mix.
///
/// The sequence depends only on the seed, so it is identical on every platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;

    /// Start a new sequence.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for SeededRandom {
    fn next(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
