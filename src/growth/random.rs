//! Random draws used by the generator.
//!
//! Generation only ever asks for uniform reals and uniform integers, so
//! tests can swap in a deterministic source without touching the algorithm.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of uniform random draws
pub trait RandomSource {
    /// Uniform real in `[low, high]`; returns `low` when the range is empty
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    /// Uniform integer in `[low, high]`; returns `low` when the range is empty
    fn uniform_int(&mut self, low: u32, high: u32) -> u32;
}

/// Adapts any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Non-reproducible source backed by the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if !(low < high) {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Deterministic source returning the middle of every range.
///
/// Every symmetric perturbation vanishes, which makes generated trees
/// fully reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointRandom;

impl RandomSource for MidpointRandom {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if !(low < high) {
            return low;
        }
        low + (high - low) * 0.5
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        low + (high - low) / 2
    }
}
