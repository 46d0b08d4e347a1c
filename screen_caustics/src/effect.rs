//! Screen-space caustics effect - per-frame driver.
//!
//! Owns the configuration, the Gaussian kernel, the random seed
//! generator and the five-stage pipeline. A host frame loop calls, in
//! order:
//!
//! 1. `configure()` with the current output resolution
//! 2. `per_frame_update()` to refresh the seed, the kernel and the bound
//!    parameters
//! 3. `render()` with the host's scene and target surfaces
//!
//! ```no_run
//! # use screen_caustics::caustics::{CausticsEffect, CausticsConfig, CausticsPrograms, Device, SurfaceKey};
//! # fn frame(device: &mut dyn Device, scene: SurfaceKey, target: SurfaceKey) -> screen_caustics::caustics::Result<()> {
//! let programs = CausticsPrograms::create(device)?;
//! let mut effect = CausticsEffect::new(CausticsConfig::default(), programs)?;
//!
//! effect.configure(device, 1920, 1080)?;
//! effect.per_frame_update()?;
//! effect.render(device, scene, target)?;
//! # Ok(())
//! # }
//! ```

use glam::Vec4;
use rand::Rng;
use rand::rngs::StdRng;
use crate::config::CausticsConfig;
use crate::device::{Device, SurfaceKey};
use crate::error::{Error, Result};
use crate::kernel::{Clock, GaussianKernel, RandomSeedGenerator, SystemClock};
use crate::pipeline::{param_names, stage_names, CausticsPrograms, FrameParameters, PostProcessPipeline};
use crate::position_depth::PositionDepthPass;
use crate::{fx_debug, fx_warn};

/// Outcome of a `render()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Every pass ran and the destination holds the composited image
    Rendered,
    /// A program was missing; the destination was left untouched
    Skipped,
}

pub struct CausticsEffect<R = StdRng> {
    config: CausticsConfig,
    kernel: GaussianKernel,
    seed_generator: RandomSeedGenerator<R>,
    clock: Box<dyn Clock>,
    random_seed: Vec4,
    pipeline: PostProcessPipeline,
    position_depth: Option<PositionDepthPass>,
}

impl CausticsEffect<StdRng> {
    /// Create the effect with an entropy-seeded random source and the wall clock
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn new(config: CausticsConfig, programs: CausticsPrograms) -> Result<Self> {
        Self::with_seed_source(config, programs, RandomSeedGenerator::from_entropy(), Box::new(SystemClock))
    }
}

impl<R: Rng> CausticsEffect<R> {
    /// Create the effect with an injected random source and clock
    ///
    /// A first seed is drawn and every frame parameter is bound, so a
    /// `render()` before the first `per_frame_update()` still sees them.
    pub fn with_seed_source(
        config: CausticsConfig,
        programs: CausticsPrograms,
        seed_generator: RandomSeedGenerator<R>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let kernel = GaussianKernel::build(config.kernel_radius, config.kernel_deviation)?;
        let pipeline = PostProcessPipeline::caustics(programs)?;

        let mut effect = Self {
            config,
            kernel,
            seed_generator,
            clock,
            random_seed: Vec4::ZERO,
            pipeline,
            position_depth: None,
        };
        effect.per_frame_update()?;
        Ok(effect)
    }

    /// Attach (or detach) a position/depth pass driven by this effect
    ///
    /// An attached pass is configured with the pipeline, rendered before
    /// the caustics passes and republished every frame.
    pub fn set_position_depth(&mut self, pass: Option<PositionDepthPass>) {
        self.position_depth = pass;
    }

    /// Allocate intermediate buffers for the output resolution
    pub fn configure(&mut self, device: &mut dyn Device, width: u32, height: u32) -> Result<()> {
        self.pipeline.configure(device, width, height)?;
        if let Some(position_depth) = &mut self.position_depth {
            position_depth.configure(device, width, height)?;
            position_depth.publish(self.pipeline.shared_parameters_mut());
        }
        Ok(())
    }

    /// Replace the configuration
    ///
    /// The kernel is rebuilt on the next `per_frame_update()` if its
    /// radius or deviation changed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` and keeps the previous configuration
    /// if the new one is invalid.
    pub fn set_config(&mut self, config: CausticsConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Refresh the random seed and kernel, then bind the frame parameters
    pub fn per_frame_update(&mut self) -> Result<()> {
        self.random_seed = self.seed_generator.next_from(self.clock.as_ref());

        let (radius, deviation) = (self.config.kernel_radius, self.config.kernel_deviation);
        if !self.kernel.matches(radius, deviation) {
            self.kernel.rebuild(radius, deviation)?;
            fx_debug!("caustics::Effect", "Gaussian kernel rebuilt (radius {}, deviation {})",
                self.kernel.radius(), deviation);
        }

        let params = FrameParameters::from_config(&self.config, &self.kernel, self.random_seed);
        self.pipeline.update_parameters(&params)
    }

    /// Run the pipeline for one frame
    ///
    /// An attached position/depth pass runs first and its surface is
    /// republished as `_WorldPositionDepthTexture`. On success the final
    /// caustics buffer is published in the shared parameters as
    /// `_CausticsBuffer`. A missing program skips the frame with a
    /// warning instead of failing; every other error propagates.
    pub fn render(&mut self, device: &mut dyn Device, source: SurfaceKey, destination: SurfaceKey) -> Result<FrameStatus> {
        let result = match self.render_position_depth(device) {
            Ok(()) => self.pipeline.execute(device, source, destination),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                if let Some(caustics) = self.pipeline.buffer_surface(stage_names::BLUR_OUTPUT) {
                    self.pipeline.shared_parameters_mut().set_surface(param_names::CAUSTICS_BUFFER, caustics);
                }
                Ok(FrameStatus::Rendered)
            }
            Err(Error::MissingKernel(msg)) => {
                fx_warn!("caustics::Effect", "Caustics skipped this frame: {}", msg);
                Ok(FrameStatus::Skipped)
            }
            Err(e) => Err(e),
        }
    }

    fn render_position_depth(&mut self, device: &mut dyn Device) -> Result<()> {
        let Some(position_depth) = &mut self.position_depth else {
            return Ok(());
        };
        position_depth.render(device)?;
        position_depth.publish(self.pipeline.shared_parameters_mut());
        Ok(())
    }

    /// Release the intermediate buffers
    pub fn release(&mut self, device: &mut dyn Device) {
        self.pipeline.release(device);
        if let Some(position_depth) = &mut self.position_depth {
            position_depth.release(device);
        }
    }

    pub fn config(&self) -> &CausticsConfig {
        &self.config
    }

    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Seed drawn by the last `per_frame_update()`
    pub fn random_seed(&self) -> Vec4 {
        self.random_seed
    }

    pub fn pipeline(&self) -> &PostProcessPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut PostProcessPipeline {
        &mut self.pipeline
    }

    pub fn position_depth(&self) -> Option<&PositionDepthPass> {
        self.position_depth.as_ref()
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
