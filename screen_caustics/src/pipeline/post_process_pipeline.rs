//! Ordered multi-pass post-processing pipeline.
//!
//! A pipeline is built once from buffer and pass descriptors, then
//! driven every frame:
//!
//! 1. `configure()` allocates the intermediate buffers for the output
//!    resolution (no-op when the resolution did not change)
//! 2. `update_parameters()` refreshes the shared parameter block
//! 3. `execute()` runs every pass in order against the host's source and
//!    destination surfaces
//!
//! The pass list is validated at build time so that no pass reads an
//! intermediate buffer before an earlier pass wrote it, and execute
//! checks every program slot before the first invocation so a missing
//! program never leaves the destination half-written.

use std::sync::Arc;
use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::config::{CausticsConfig, MAX_SAMPLE_SETTING};
use crate::device::{Device, Program, ProgramDesc, SurfaceDesc, SurfaceFormat, SurfaceKey};
use crate::error::Result;
use crate::kernel::{GaussianKernel, MAX_RADIUS};
use crate::{fx_bail, fx_debug, fx_err, fx_error, fx_info, fx_trace};
use super::buffer::{BufferRef, BufferSlot, IntermediateBuffer, IntermediateBufferDesc};
use super::parameter_block::ParameterBlock;
use super::pass::{Pass, PassDesc, MAX_PASS_INPUTS};
use super::param_names;

// ===== CAUSTICS PROGRAM SET =====

/// Programs bound to the five caustics stages
///
/// Any slot may be None; execute then fails with `MissingKernel`.
#[derive(Clone, Default)]
pub struct CausticsPrograms {
    pub generate: Option<Arc<dyn Program>>,
    pub median: Option<Arc<dyn Program>>,
    /// Shared by the horizontal and vertical blur passes
    pub blur: Option<Arc<dyn Program>>,
    pub composite: Option<Arc<dyn Program>>,
}

impl CausticsPrograms {
    pub const GENERATE_PROGRAM: &'static str = "caustics_generate";
    pub const MEDIAN_PROGRAM: &'static str = "median_filter";
    pub const BLUR_PROGRAM: &'static str = "gaussian_blur";
    pub const COMPOSITE_PROGRAM: &'static str = "caustics_composite";

    /// Create the standard program set on a device
    pub fn create(device: &mut dyn Device) -> Result<Self> {
        let mut create = |name: &str| {
            device.create_program(&ProgramDesc { name: name.to_string() }).map(Some)
        };

        Ok(Self {
            generate: create(Self::GENERATE_PROGRAM)?,
            median: create(Self::MEDIAN_PROGRAM)?,
            blur: create(Self::BLUR_PROGRAM)?,
            composite: create(Self::COMPOSITE_PROGRAM)?,
        })
    }
}

// ===== FRAME PARAMETERS =====

/// Per-frame values bound to every pass on the next execute
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParameters {
    pub caustic_strength: f32,
    pub sample_count: u32,
    pub sample_distance: u32,
    pub kernel_values: [f32; MAX_RADIUS],
    pub kernel_size: u32,
    pub random_seed: Vec4,
}

impl FrameParameters {
    /// Gather the frame values from the effect configuration and CPU inputs
    pub fn from_config(config: &CausticsConfig, kernel: &GaussianKernel, random_seed: Vec4) -> Self {
        Self {
            caustic_strength: config.caustic_strength,
            sample_count: config.sample_count,
            sample_distance: config.sample_distance,
            kernel_values: *kernel.weights(),
            kernel_size: kernel.radius() as u32,
            random_seed,
        }
    }
}

// ===== PIPELINE =====

pub struct PostProcessPipeline {
    passes: Vec<Pass>,
    pass_names: FxHashMap<String, usize>,
    buffers: Vec<IntermediateBuffer>,
    buffer_names: FxHashMap<String, usize>,
    /// Default parameters bound to every pass (per-pass values win)
    shared_params: ParameterBlock,
    /// Resolution the intermediates are allocated for
    resolution: Option<(u32, u32)>,
}

impl PostProcessPipeline {
    /// Build a pipeline from buffer and pass descriptors
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - two buffers or two passes share a name
    /// - a pass has more than two inputs
    /// - a pass references an unknown buffer
    /// - a pass reads the destination or writes the source
    /// - a pass reads an intermediate buffer no earlier pass has written
    pub fn new(buffer_descs: Vec<IntermediateBufferDesc>, pass_descs: Vec<PassDesc>) -> Result<Self> {
        let mut buffers = Vec::with_capacity(buffer_descs.len());
        let mut buffer_names = FxHashMap::default();

        for desc in buffer_descs {
            if buffer_names.contains_key(&desc.name) {
                fx_bail!("caustics::Pipeline", InvalidParameter,
                    "Duplicate buffer name '{}'", desc.name);
            }
            buffer_names.insert(desc.name.clone(), buffers.len());
            buffers.push(IntermediateBuffer::new(desc));
        }

        let mut passes = Vec::with_capacity(pass_descs.len());
        let mut pass_names = FxHashMap::default();
        let mut written = vec![false; buffers.len()];

        for (pass_id, desc) in pass_descs.into_iter().enumerate() {
            if pass_names.contains_key(&desc.name) {
                fx_bail!("caustics::Pipeline", InvalidParameter,
                    "Duplicate pass name '{}'", desc.name);
            }
            if desc.inputs.len() > MAX_PASS_INPUTS {
                fx_bail!("caustics::Pipeline", InvalidParameter,
                    "Pass '{}' has {} inputs (max {})", desc.name, desc.inputs.len(), MAX_PASS_INPUTS);
            }

            // ========== RESOLVE INPUTS ==========
            let mut inputs = Vec::with_capacity(desc.inputs.len());
            for slot in &desc.inputs {
                let resolved = match slot {
                    BufferSlot::Source => BufferRef::Source,
                    BufferSlot::Destination => {
                        fx_bail!("caustics::Pipeline", InvalidParameter,
                            "Pass '{}' reads the destination surface", desc.name);
                    }
                    BufferSlot::Named(name) => {
                        let idx = *buffer_names.get(name)
                            .ok_or_else(|| fx_err!("caustics::Pipeline", InvalidParameter,
                                "Pass '{}' reads unknown buffer '{}'", desc.name, name))?;
                        if !written[idx] {
                            fx_bail!("caustics::Pipeline", InvalidParameter,
                                "Pass '{}' reads buffer '{}' before it is written", desc.name, name);
                        }
                        BufferRef::Intermediate(idx)
                    }
                };
                inputs.push(resolved);
            }

            // ========== RESOLVE OUTPUT ==========
            let output = match &desc.output {
                BufferSlot::Source => {
                    fx_bail!("caustics::Pipeline", InvalidParameter,
                        "Pass '{}' writes the source surface", desc.name);
                }
                BufferSlot::Destination => BufferRef::Destination,
                BufferSlot::Named(name) => {
                    let idx = *buffer_names.get(name)
                        .ok_or_else(|| fx_err!("caustics::Pipeline", InvalidParameter,
                            "Pass '{}' writes unknown buffer '{}'", desc.name, name))?;
                    written[idx] = true;
                    buffers[idx].set_first_writer(pass_id);
                    BufferRef::Intermediate(idx)
                }
            };

            pass_names.insert(desc.name.clone(), passes.len());
            passes.push(Pass::new(desc.name, desc.program, inputs, output, desc.params));
        }

        Ok(Self {
            passes,
            pass_names,
            buffers,
            buffer_names,
            shared_params: ParameterBlock::new(),
            resolution: None,
        })
    }

    /// Build the five-stage caustics pipeline
    ///
    /// generate -> median -> blur horizontal -> blur vertical -> composite,
    /// ping-ponging between `causticOutput` and `blurOutput`. The final
    /// caustics image ends up in `blurOutput`.
    pub fn caustics(programs: CausticsPrograms) -> Result<Self> {
        use super::stage_names::*;

        let buffers = vec![
            IntermediateBufferDesc::new(CAUSTIC_OUTPUT, SurfaceFormat::R8G8B8A8_UNORM),
            IntermediateBufferDesc::new(BLUR_OUTPUT, SurfaceFormat::R8G8B8A8_UNORM),
        ];

        let mut horizontal = ParameterBlock::new();
        horizontal.set_vector(param_names::PASS_DIRECTION, Vec4::new(1.0, 0.0, 0.0, 0.0));
        let mut vertical = ParameterBlock::new();
        vertical.set_vector(param_names::PASS_DIRECTION, Vec4::new(0.0, 1.0, 0.0, 0.0));

        let passes = vec![
            PassDesc::new(GENERATE, programs.generate,
                vec![], BufferSlot::named(CAUSTIC_OUTPUT)),
            PassDesc::new(MEDIAN, programs.median,
                vec![BufferSlot::named(CAUSTIC_OUTPUT)], BufferSlot::named(BLUR_OUTPUT)),
            PassDesc::new(BLUR_HORIZONTAL, programs.blur.clone(),
                vec![BufferSlot::named(BLUR_OUTPUT)], BufferSlot::named(CAUSTIC_OUTPUT))
                .with_params(horizontal),
            PassDesc::new(BLUR_VERTICAL, programs.blur,
                vec![BufferSlot::named(CAUSTIC_OUTPUT)], BufferSlot::named(BLUR_OUTPUT))
                .with_params(vertical),
            PassDesc::new(COMPOSITE, programs.composite,
                vec![BufferSlot::Source, BufferSlot::named(BLUR_OUTPUT)], BufferSlot::Destination),
        ];

        Self::new(buffers, passes)
    }

    // ===== RESOLUTION / BUFFER LIFECYCLE =====

    /// Allocate intermediate buffers for the output resolution
    ///
    /// Idempotent when the resolution is unchanged. On a change, every
    /// previous surface is released before the new ones are created, so
    /// buffer contents never survive a resolution change.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if width or height is zero
    /// - the device error (normally `BufferAllocationFailure`) if a surface
    ///   cannot be created; the pipeline is left unconfigured
    pub fn configure(&mut self, device: &mut dyn Device, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Invalid resolution {}x{}", width, height);
        }

        if self.resolution == Some((width, height)) {
            fx_trace!("caustics::Pipeline", "Resolution {}x{} unchanged", width, height);
            return Ok(());
        }

        self.release(device);

        for idx in 0..self.buffers.len() {
            let desc = SurfaceDesc {
                name: self.buffers[idx].name().to_string(),
                width,
                height,
                format: self.buffers[idx].format(),
            };

            match device.create_surface(&desc) {
                Ok(surface) => self.buffers[idx].attach(surface, width, height),
                Err(e) => {
                    fx_error!("caustics::Pipeline",
                        "Failed to allocate buffer '{}' ({}x{}): {}", desc.name, width, height, e);
                    self.release(device);
                    return Err(e);
                }
            }
        }

        self.resolution = Some((width, height));
        fx_info!("caustics::Pipeline",
            "Configured {} intermediate buffers at {}x{}", self.buffers.len(), width, height);
        Ok(())
    }

    /// Release every intermediate surface
    ///
    /// The pipeline must be configured again before the next execute.
    pub fn release(&mut self, device: &mut dyn Device) {
        for buffer in &mut self.buffers {
            if let Some(surface) = buffer.detach() {
                device.destroy_surface(surface);
            }
        }
        self.resolution = None;
    }

    /// Get the configured resolution
    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.resolution
    }

    // ===== PARAMETERS =====

    /// Replace the per-frame values bound on the next execute
    ///
    /// Does not touch buffers. Nothing is written if any value is invalid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-finite strength, sample
    /// settings above 512, or a kernel size above `MAX_RADIUS`.
    pub fn update_parameters(&mut self, params: &FrameParameters) -> Result<()> {
        if !params.caustic_strength.is_finite() {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Caustic strength must be finite, got {}", params.caustic_strength);
        }
        if params.sample_count > MAX_SAMPLE_SETTING {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Sample count {} exceeds {}", params.sample_count, MAX_SAMPLE_SETTING);
        }
        if params.sample_distance > MAX_SAMPLE_SETTING {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Sample distance {} exceeds {}", params.sample_distance, MAX_SAMPLE_SETTING);
        }
        if params.kernel_size as usize > MAX_RADIUS {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Kernel size {} exceeds {}", params.kernel_size, MAX_RADIUS);
        }

        let shared = &mut self.shared_params;
        shared.set_float(param_names::CAUSTIC_STRENGTH, params.caustic_strength);
        shared.set_int(param_names::SAMPLE_COUNT, params.sample_count as i32);
        shared.set_int(param_names::SAMPLE_DISTANCE, params.sample_distance as i32);
        shared.set_float_array(param_names::GAUSS_KERNEL_VALUES, &params.kernel_values);
        shared.set_float(param_names::KERNEL_SIZE, params.kernel_size as f32);
        shared.set_vector(param_names::RANDOM_SEED, params.random_seed);
        Ok(())
    }

    /// Parameters bound to every pass
    pub fn shared_parameters(&self) -> &ParameterBlock {
        &self.shared_params
    }

    pub fn shared_parameters_mut(&mut self) -> &mut ParameterBlock {
        &mut self.shared_params
    }

    // ===== EXECUTION =====

    /// Run every pass in order
    ///
    /// Each pass gets the shared parameters merged with its own, then the
    /// device runs its program on the resolved input/output surfaces.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the pipeline is not configured, or the
    ///   source/destination are unknown to the device, aliased, or sized
    ///   differently from the configured resolution
    /// - `MissingKernel` if any pass has no program; nothing is invoked
    /// - any device error raised by an invocation (intermediate buffers may
    ///   then be partially written, the destination is written last)
    pub fn execute(&mut self, device: &mut dyn Device, source: SurfaceKey, destination: SurfaceKey) -> Result<()> {
        let Some((width, height)) = self.resolution else {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Pipeline executed before configure()");
        };

        if let Some(pass) = self.passes.iter().find(|p| p.program().is_none()) {
            fx_bail!("caustics::Pipeline", MissingKernel,
                "Pass '{}' has no program bound", pass.name());
        }

        if source == destination {
            fx_bail!("caustics::Pipeline", InvalidParameter,
                "Source and destination must be different surfaces");
        }
        for (role, surface) in [("source", source), ("destination", destination)] {
            let Some(info) = device.surface_info(surface) else {
                fx_bail!("caustics::Pipeline", InvalidParameter, "Unknown {} surface", role);
            };
            if (info.width, info.height) != (width, height) {
                fx_bail!("caustics::Pipeline", InvalidParameter,
                    "The {} surface is {}x{} but the pipeline is configured for {}x{}",
                    role, info.width, info.height, width, height);
            }
        }

        for (pass_id, pass) in self.passes.iter().enumerate() {
            let resolve = |buffer: BufferRef| -> Result<SurfaceKey> {
                match buffer {
                    BufferRef::Source => Ok(source),
                    BufferRef::Destination => Ok(destination),
                    BufferRef::Intermediate(idx) => self.buffers[idx].surface()
                        .ok_or_else(|| fx_err!("caustics::Pipeline", InvalidParameter,
                            "Buffer '{}' is not allocated", self.buffers[idx].name())),
                }
            };

            let inputs = pass.inputs().iter()
                .map(|&input| resolve(input))
                .collect::<Result<Vec<_>>>()?;
            let output = resolve(pass.output())?;
            let params = self.shared_params.merged_with(pass.params());

            // Checked above
            let Some(program) = pass.program() else { continue };

            fx_trace!("caustics::Pipeline", "Pass {} '{}' running program '{}'",
                pass_id, pass.name(), program.name());

            device.invoke(program, &params, &inputs, output).map_err(|e| {
                fx_error!("caustics::Pipeline", "Pass '{}' failed: {}", pass.name(), e);
                e
            })?;
        }

        fx_debug!("caustics::Pipeline", "Executed {} passes", self.passes.len());
        Ok(())
    }

    // ===== PASS ACCESS =====

    /// Bind (or unbind) the program of a pass
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if no pass has this name.
    pub fn set_program(&mut self, pass_name: &str, program: Option<Arc<dyn Program>>) -> Result<()> {
        let idx = *self.pass_names.get(pass_name)
            .ok_or_else(|| fx_err!("caustics::Pipeline", InvalidParameter,
                "Unknown pass '{}'", pass_name))?;
        self.passes[idx].set_program(program);
        Ok(())
    }

    /// Get a pass by name
    pub fn pass(&self, name: &str) -> Option<&Pass> {
        let idx = self.pass_names.get(name)?;
        self.passes.get(*idx)
    }

    pub fn pass_mut(&mut self, name: &str) -> Option<&mut Pass> {
        let idx = self.pass_names.get(name)?;
        self.passes.get_mut(*idx)
    }

    /// Passes in execution order
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    // ===== BUFFER ACCESS =====

    /// Get an intermediate buffer by name
    pub fn buffer(&self, name: &str) -> Option<&IntermediateBuffer> {
        let idx = self.buffer_names.get(name)?;
        self.buffers.get(*idx)
    }

    /// Get the surface currently backing an intermediate buffer
    pub fn buffer_surface(&self, name: &str) -> Option<SurfaceKey> {
        self.buffer(name)?.surface()
    }

    pub fn buffers(&self) -> &[IntermediateBuffer] {
        &self.buffers
    }
}

#[cfg(test)]
#[path = "post_process_pipeline_tests.rs"]
mod tests;
