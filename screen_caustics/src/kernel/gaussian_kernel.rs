//! Discrete 1-D Gaussian kernel used by the separable blur passes.
//!
//! The kernel stores one half of a symmetric filter: index 0 is the
//! center tap and index `i` is applied at offsets `+i` and `-i`, so a
//! radius of `MAX_RADIUS` describes a filter up to `2 * MAX_RADIUS + 1`
//! taps wide. Weights are not normalized; the blur program is
//! responsible for any normalization it needs.

use crate::error::Result;
use crate::{fx_bail, fx_warn};

/// Maximum kernel radius (number of stored weights)
pub const MAX_RADIUS: usize = 32;

/// Standard normal density with mean 0
pub fn normal_distribution(x: f32, deviation: f32) -> f32 {
    let numerator = (-0.5 * (x / deviation).powi(2)).exp();
    let denominator = deviation * (2.0 * std::f32::consts::PI).sqrt();
    numerator / denominator
}

/// Half of a symmetric Gaussian filter
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: [f32; MAX_RADIUS],
    radius: usize,
    deviation: f32,
}

impl GaussianKernel {
    /// Create an empty kernel (radius 0, all weights zero)
    pub fn new() -> Self {
        Self {
            weights: [0.0; MAX_RADIUS],
            radius: 0,
            deviation: 1.0,
        }
    }

    /// Build a fresh kernel
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `deviation` is not a finite value > 0.
    pub fn build(radius: u32, deviation: f32) -> Result<Self> {
        let mut kernel = Self::new();
        kernel.rebuild(radius, deviation)?;
        Ok(kernel)
    }

    /// Recompute weights `[0, radius)` in place
    ///
    /// Weight `i` is the normal density evaluated at `i * i / radius`.
    /// Weights at indices `>= radius` keep their previous value.
    /// A radius above `MAX_RADIUS` is clamped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `deviation` is not a finite value > 0.
    /// The kernel is left untouched on error.
    pub fn rebuild(&mut self, radius: u32, deviation: f32) -> Result<()> {
        if !(deviation > 0.0) || !deviation.is_finite() {
            fx_bail!("caustics::GaussianKernel", InvalidParameter,
                "Gaussian deviation must be > 0, got {}", deviation);
        }

        let mut radius = radius as usize;
        if radius > MAX_RADIUS {
            fx_warn!("caustics::GaussianKernel",
                "Kernel radius {} exceeds maximum, clamped to {}", radius, MAX_RADIUS);
            radius = MAX_RADIUS;
        }

        for i in 0..radius {
            let x = (i * i) as f32 / radius as f32;
            self.weights[i] = normal_distribution(x, deviation);
        }

        self.radius = radius;
        self.deviation = deviation;
        Ok(())
    }

    /// Whether the kernel was last built with these settings
    pub fn matches(&self, radius: u32, deviation: f32) -> bool {
        self.radius == (radius as usize).min(MAX_RADIUS) && self.deviation == deviation
    }

    /// All `MAX_RADIUS` weights, as bound to the blur program
    pub fn weights(&self) -> &[f32; MAX_RADIUS] {
        &self.weights
    }

    /// Weights populated by the last build (`[0, radius)`)
    pub fn active_weights(&self) -> &[f32] {
        &self.weights[..self.radius]
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn deviation(&self) -> f32 {
        self.deviation
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gaussian_kernel_tests.rs"]
mod tests;
