//! Auxiliary world-position/depth pass.
//!
//! Renders the scene through a replacement program into a float RGBA
//! surface (xyz = world position, w = depth) at the output resolution,
//! and publishes that surface under `_WorldPositionDepthTexture` so the
//! caustics generate program can sample it.

use std::sync::Arc;
use crate::device::{Device, Program, SurfaceDesc, SurfaceFormat, SurfaceKey};
use crate::error::Result;
use crate::pipeline::{param_names, ParameterBlock};
use crate::{fx_bail, fx_info};

pub struct PositionDepthPass {
    program: Option<Arc<dyn Program>>,
    surface: Option<SurfaceKey>,
    resolution: Option<(u32, u32)>,
}

impl PositionDepthPass {
    pub const PROGRAM: &'static str = "position_depth";
    pub const FORMAT: SurfaceFormat = SurfaceFormat::R32G32B32A32_SFLOAT;

    pub fn new(program: Option<Arc<dyn Program>>) -> Self {
        Self {
            program,
            surface: None,
            resolution: None,
        }
    }

    /// Allocate the output surface (no-op when the resolution is unchanged)
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if width or height is zero
    /// - the device error if the surface cannot be allocated
    pub fn configure(&mut self, device: &mut dyn Device, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            fx_bail!("caustics::PositionDepth", InvalidParameter,
                "Invalid resolution {}x{}", width, height);
        }
        if self.resolution == Some((width, height)) {
            return Ok(());
        }

        self.release(device);
        let surface = device.create_surface(&SurfaceDesc {
            name: "worldPositionDepth".to_string(),
            width,
            height,
            format: Self::FORMAT,
        })?;

        self.surface = Some(surface);
        self.resolution = Some((width, height));
        fx_info!("caustics::PositionDepth", "Allocated position/depth surface {}x{}", width, height);
        Ok(())
    }

    /// Render world position and depth into the output surface
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the pass is not configured
    /// - `MissingKernel` if no program is bound
    pub fn render(&mut self, device: &mut dyn Device) -> Result<()> {
        let Some(surface) = self.surface else {
            fx_bail!("caustics::PositionDepth", InvalidParameter,
                "Position/depth pass rendered before configure()");
        };
        let Some(program) = &self.program else {
            fx_bail!("caustics::PositionDepth", MissingKernel,
                "Position/depth pass has no program bound");
        };

        device.invoke(program, &ParameterBlock::new(), &[], surface)
    }

    /// Publish the output surface into a parameter table
    ///
    /// Does nothing until the pass is configured. The surface key changes
    /// whenever `configure()` reallocates, so a host driving this pass
    /// itself must publish again every frame. `CausticsEffect` does this
    /// for a pass attached with `set_position_depth()`.
    pub fn publish(&self, params: &mut ParameterBlock) {
        if let Some(surface) = self.surface {
            params.set_surface(param_names::WORLD_POSITION_DEPTH_TEXTURE, surface);
        }
    }

    /// Release the output surface
    pub fn release(&mut self, device: &mut dyn Device) {
        if let Some(surface) = self.surface.take() {
            device.destroy_surface(surface);
        }
        self.resolution = None;
    }

    pub fn set_program(&mut self, program: Option<Arc<dyn Program>>) {
        self.program = program;
    }

    pub fn surface(&self) -> Option<SurfaceKey> {
        self.surface
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.resolution
    }
}

#[cfg(test)]
#[path = "position_depth_tests.rs"]
mod tests;
