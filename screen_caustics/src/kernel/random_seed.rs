//! Time-seeded random vector for shader dithering.
//!
//! Each frame the generate program receives a fresh 4-component seed:
//! four uniform draws in `[0, 1)` scaled by a slowly varying clock value.
//! Both the random source and the clock are injectable so tests can
//! reproduce a seed exactly.

use chrono::{Local, Timelike};
use glam::Vec4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bound applied to the clock value before scaling
pub const SEED_CLOCK_MODULUS: u64 = i32::MAX as u64;

/// Source of the clock value used to scale the seed
pub trait Clock {
    /// Current clock value in seconds
    fn seconds(&self) -> u64;
}

/// Wall clock, reporting the seconds field of the local time (0..=59)
pub struct SystemClock;

impl Clock for SystemClock {
    fn seconds(&self) -> u64 {
        Local::now().second() as u64
    }
}

/// Clock frozen at a given value
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn seconds(&self) -> u64 {
        self.0
    }
}

/// Random seed generator
pub struct RandomSeedGenerator<R = StdRng> {
    rng: R,
}

impl RandomSeedGenerator<StdRng> {
    /// Generator backed by an OS-seeded StdRng
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible generator backed by a StdRng with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomSeedGenerator<R> {
    /// Generator backed by any random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the next seed for a given clock value
    pub fn next(&mut self, clock_seconds: u64) -> Vec4 {
        let scale = (clock_seconds % SEED_CLOCK_MODULUS) as f32;
        Vec4::new(
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
        ) * scale
    }

    /// Draw the next seed, reading the clock value from `clock`
    pub fn next_from(&mut self, clock: &dyn Clock) -> Vec4 {
        self.next(clock.seconds())
    }
}

#[cfg(test)]
#[path = "random_seed_tests.rs"]
mod tests;
