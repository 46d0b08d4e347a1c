//! Per-frame shader inputs computed on the CPU
//!
//! Provides the Gaussian blur kernel and the dithering random seed.
//! Both are recomputed every frame and bound to the blur and generate
//! passes by the caustics effect.

mod gaussian_kernel;
mod random_seed;

pub use gaussian_kernel::{GaussianKernel, MAX_RADIUS, normal_distribution};
pub use random_seed::{Clock, FixedClock, RandomSeedGenerator, SystemClock, SEED_CLOCK_MODULUS};
