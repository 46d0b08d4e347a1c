//! Post-processing pipeline module
//!
//! Provides the ordered multi-pass pipeline that drives the caustics
//! effect: named intermediate buffers, passes bound to programs and
//! parameter blocks, and the per-frame execute sequence.

mod buffer;
mod parameter_block;
mod pass;
mod post_process_pipeline;

pub use buffer::{BufferRef, BufferSlot, IntermediateBuffer, IntermediateBufferDesc};
pub use parameter_block::{ParameterBlock, ParameterValue};
pub use pass::{Pass, PassDesc};
pub use post_process_pipeline::{CausticsPrograms, FrameParameters, PostProcessPipeline};

/// Uniform names bound by the caustics pipeline
pub mod param_names {
    pub const CAUSTIC_STRENGTH: &str = "_CausticStrength";
    pub const SAMPLE_COUNT: &str = "_SampleCount";
    pub const SAMPLE_DISTANCE: &str = "_SampleDistance";
    pub const GAUSS_KERNEL_VALUES: &str = "_GaussKernelValues";
    pub const KERNEL_SIZE: &str = "_KernelSize";
    pub const RANDOM_SEED: &str = "_RandomSeed";
    pub const PASS_DIRECTION: &str = "_PassDirection";
    pub const CAUSTICS_BUFFER: &str = "_CausticsBuffer";
    pub const WORLD_POSITION_DEPTH_TEXTURE: &str = "_WorldPositionDepthTexture";
}

/// Intermediate buffer and pass names of the caustics pipeline
pub mod stage_names {
    pub const CAUSTIC_OUTPUT: &str = "causticOutput";
    pub const BLUR_OUTPUT: &str = "blurOutput";

    pub const GENERATE: &str = "generate";
    pub const MEDIAN: &str = "median";
    pub const BLUR_HORIZONTAL: &str = "blur_horizontal";
    pub const BLUR_VERTICAL: &str = "blur_vertical";
    pub const COMPOSITE: &str = "composite";
}
