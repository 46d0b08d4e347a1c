//! Mock Device for unit tests (no GPU required)
//!
//! Surfaces are CPU arrays of RGBA f32 pixels. Programs are recognized
//! by name and apply deterministic stand-in transforms so pipeline
//! behavior can be checked pixel by pixel:
//!
//! - `caustics_generate`: fills the output with `generate_fill`
//! - `median_filter`, `gaussian_blur`: copy input 0 to the output
//! - `caustics_composite`: `input0 + input1 * _CausticStrength`
//! - `position_depth`: fills the output with `(0, 0, 0, 1)`
//!
//! Every invocation is recorded for ordering/binding checks.

use std::sync::Arc;
use slotmap::SlotMap;
use crate::device::{Device, Program, ProgramDesc, SurfaceDesc, SurfaceInfo, SurfaceKey};
use crate::error::{Error, Result};
use crate::pipeline::ParameterBlock;

// ============================================================================
// Mock Program
// ============================================================================

#[derive(Debug)]
pub struct MockProgram {
    pub name: String,
}

impl MockProgram {
    pub fn new(name: &str) -> Arc<dyn Program> {
        Arc::new(Self { name: name.to_string() })
    }
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock Surface
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockSurface {
    pub name: String,
    pub info: SurfaceInfo,
    pub pixels: Vec<[f32; 4]>,
}

// ============================================================================
// Invocation record
// ============================================================================

#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub params: ParameterBlock,
    pub inputs: Vec<SurfaceKey>,
    pub output: SurfaceKey,
}

// ============================================================================
// Mock Device
// ============================================================================

pub struct MockDevice {
    pub surfaces: SlotMap<SurfaceKey, MockSurface>,
    pub invocations: Vec<Invocation>,
    pub created_count: usize,
    pub destroyed_count: usize,
    /// Value written by `caustics_generate`
    pub generate_fill: [f32; 4],
    /// When Some(n), the next n allocations succeed and the following ones fail
    pub allocations_before_failure: Option<usize>,
    /// Invocations of this program fail with BackendError
    pub failing_program: Option<String>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            surfaces: SlotMap::with_key(),
            invocations: Vec::new(),
            created_count: 0,
            destroyed_count: 0,
            generate_fill: [0.0; 4],
            allocations_before_failure: None,
            failing_program: None,
        }
    }

    /// Create a host-owned surface filled with a constant color
    pub fn create_filled_surface(&mut self, name: &str, width: u32, height: u32, color: [f32; 4]) -> SurfaceKey {
        self.surfaces.insert(MockSurface {
            name: name.to_string(),
            info: SurfaceInfo {
                width,
                height,
                format: crate::device::SurfaceFormat::R8G8B8A8_UNORM,
            },
            pixels: vec![color; (width * height) as usize],
        })
    }

    pub fn pixels(&self, surface: SurfaceKey) -> &[[f32; 4]] {
        &self.surfaces[surface].pixels
    }

    pub fn invoked_programs(&self) -> Vec<&str> {
        self.invocations.iter().map(|i| i.program.as_str()).collect()
    }

    fn input_pixels(&self, inputs: &[SurfaceKey], index: usize) -> Result<Vec<[f32; 4]>> {
        let key = inputs.get(index)
            .ok_or_else(|| Error::BackendError(format!("missing input {}", index)))?;
        self.surfaces.get(*key)
            .map(|s| s.pixels.clone())
            .ok_or_else(|| Error::BackendError(format!("unknown input surface {:?}", key)))
    }
}

impl Device for MockDevice {
    fn create_surface(&mut self, desc: &SurfaceDesc) -> Result<SurfaceKey> {
        if let Some(remaining) = self.allocations_before_failure {
            if remaining == 0 {
                return Err(Error::BufferAllocationFailure(format!(
                    "mock device refused '{}' ({}x{})", desc.name, desc.width, desc.height)));
            }
            self.allocations_before_failure = Some(remaining - 1);
        }

        self.created_count += 1;
        Ok(self.surfaces.insert(MockSurface {
            name: desc.name.clone(),
            info: SurfaceInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
            },
            pixels: vec![[0.0; 4]; (desc.width * desc.height) as usize],
        }))
    }

    fn destroy_surface(&mut self, surface: SurfaceKey) {
        if self.surfaces.remove(surface).is_some() {
            self.destroyed_count += 1;
        }
    }

    fn surface_info(&self, surface: SurfaceKey) -> Option<SurfaceInfo> {
        self.surfaces.get(surface).map(|s| s.info)
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>> {
        Ok(MockProgram::new(&desc.name))
    }

    fn invoke(
        &mut self,
        program: &Arc<dyn Program>,
        params: &ParameterBlock,
        inputs: &[SurfaceKey],
        output: SurfaceKey,
    ) -> Result<()> {
        if self.failing_program.as_deref() == Some(program.name()) {
            return Err(Error::BackendError(format!("mock failure in '{}'", program.name())));
        }

        let pixel_count = self.surfaces.get(output)
            .map(|s| s.pixels.len())
            .ok_or_else(|| Error::BackendError(format!("unknown output surface {:?}", output)))?;

        let result: Vec<[f32; 4]> = match program.name() {
            "caustics_generate" => vec![self.generate_fill; pixel_count],
            "position_depth" => vec![[0.0, 0.0, 0.0, 1.0]; pixel_count],
            "median_filter" | "gaussian_blur" => self.input_pixels(inputs, 0)?,
            "caustics_composite" => {
                let scene = self.input_pixels(inputs, 0)?;
                let caustics = self.input_pixels(inputs, 1)?;
                let strength = params.float("_CausticStrength").unwrap_or(1.0);
                scene.iter().zip(caustics.iter())
                    .map(|(s, c)| [
                        s[0] + c[0] * strength,
                        s[1] + c[1] * strength,
                        s[2] + c[2] * strength,
                        s[3],
                    ])
                    .collect()
            }
            other => return Err(Error::BackendError(format!("unknown mock program '{}'", other))),
        };

        if result.len() != pixel_count {
            return Err(Error::BackendError("input/output size mismatch".to_string()));
        }

        self.surfaces[output].pixels = result;
        self.invocations.push(Invocation {
            program: program.name().to_string(),
            params: params.clone(),
            inputs: inputs.to_vec(),
            output,
        });
        Ok(())
    }
}
