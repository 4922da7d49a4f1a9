//! Random number source threaded through the rule engine.
//!
//! Every draw the engine makes goes through [`RandomSource`], so a run can be made
//! reproducible by passing a seeded source, and tests can script exact values.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random draws needed by the tag rule engine.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, inclusive on both ends.
    fn random_range(&mut self, min: i32, max: i32) -> i32;

    /// Unbiased coin flip.
    fn coin_flip(&mut self) -> bool {
        self.random_range(0, 1) == 1
    }

    /// Pick `count` distinct indices out of `0..len`, in draw order.
    ///
    /// Partial Fisher-Yates, so every subset and order is equally likely.
    fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        for i in 0..count {
            let j = self.random_range(i as i32, (len - 1) as i32) as usize;
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source; the same seed always yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system, for unreproducible production runs.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn random_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Scripted source for deterministic tests and golden files.
///
/// Returns the provided values in order, cycling when exhausted, each clamped into the
/// requested range.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<i32>,
    index: usize,
}

impl SequenceRandom {
    /// Source replaying `values`.
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, index: 0 }
    }

    /// A source that always returns `value` (clamped).
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn random_range(&mut self, min: i32, max: i32) -> i32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max.max(min))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
