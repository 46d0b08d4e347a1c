//! Caustics effect configuration
//!
//! Mirrors the options a host exposes for the effect. Values are
//! validated before they reach the pipeline; out-of-range values are
//! rejected rather than clamped, except the kernel radius which the
//! Gaussian kernel builder clamps itself.

use crate::error::Result;
use crate::fx_bail;
use crate::kernel::MAX_RADIUS;

/// Upper bound for `sample_count` and `sample_distance`
pub const MAX_SAMPLE_SETTING: u32 = 512;

/// Effect configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CausticsConfig {
    /// Multiplier applied to the caustics term during composite
    pub caustic_strength: f32,
    /// Number of samples taken by the generate program, in [0, 512]
    pub sample_count: u32,
    /// Sampling distance in pixels used by the generate program, in [0, 512]
    pub sample_distance: u32,
    /// Gaussian blur kernel radius, in [0, MAX_RADIUS]
    pub kernel_radius: u32,
    /// Gaussian standard deviation, must be > 0
    pub kernel_deviation: f32,
}

impl Default for CausticsConfig {
    fn default() -> Self {
        Self {
            caustic_strength: 1.0,
            sample_count: 16,
            sample_distance: 32,
            kernel_radius: 8,
            kernel_deviation: 2.0,
        }
    }
}

impl CausticsConfig {
    /// Check every option against its accepted range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-finite strength, sample settings
    /// above 512, or a non-positive / non-finite deviation.
    /// A kernel radius above `MAX_RADIUS` is accepted here and clamped
    /// (with a warning) when the kernel is built.
    pub fn validate(&self) -> Result<()> {
        if !self.caustic_strength.is_finite() {
            fx_bail!("caustics::Config", InvalidParameter,
                "caustic_strength must be finite, got {}", self.caustic_strength);
        }
        if self.sample_count > MAX_SAMPLE_SETTING {
            fx_bail!("caustics::Config", InvalidParameter,
                "sample_count {} exceeds {}", self.sample_count, MAX_SAMPLE_SETTING);
        }
        if self.sample_distance > MAX_SAMPLE_SETTING {
            fx_bail!("caustics::Config", InvalidParameter,
                "sample_distance {} exceeds {}", self.sample_distance, MAX_SAMPLE_SETTING);
        }
        if !(self.kernel_deviation > 0.0) || !self.kernel_deviation.is_finite() {
            fx_bail!("caustics::Config", InvalidParameter,
                "kernel_deviation must be > 0, got {}", self.kernel_deviation);
        }
        Ok(())
    }

    /// Kernel radius restricted to `[0, MAX_RADIUS]`
    pub fn clamped_kernel_radius(&self) -> u32 {
        self.kernel_radius.min(MAX_RADIUS as u32)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
