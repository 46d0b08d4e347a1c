/*!
# Screen Caustics

Screen-space caustics post-processing effect.

Each frame the effect estimates light focusing from the rendered scene,
denoises and softens the estimate, and adds it back onto the scene:

1. **generate**: scene -> `causticOutput` (random-seeded sampling)
2. **median**: `causticOutput` -> `blurOutput`
3. **blur_horizontal**: `blurOutput` -> `causticOutput`
4. **blur_vertical**: `causticOutput` -> `blurOutput`
5. **composite**: scene + `blurOutput` -> destination

The crate computes the CPU-side inputs (Gaussian kernel weights, random
seed, strength and sample settings), owns the intermediate buffers and
sequences the passes. Pixel work is delegated to a backend through the
`Device` trait.

## Architecture

- **CausticsEffect**: per-frame driver (configure, update, render)
- **PostProcessPipeline**: ordered passes over named intermediate buffers
- **GaussianKernel**: blur weights
- **RandomSeedGenerator**: time-scaled dithering seed
- **PositionDepthPass**: world position/depth surface for the generate program
- **Device**: backend boundary (surfaces and program invocation)
*/

// Internal modules
mod error;
mod config;
mod effect;
mod position_depth;
pub mod log;
pub mod kernel;
pub mod device;
pub mod pipeline;

#[cfg(test)]
mod test_utils;

// Main caustics namespace module
pub mod caustics {
    // Error types
    pub use crate::error::{Error, Result};

    // Effect driver and configuration
    pub use crate::config::{CausticsConfig, MAX_SAMPLE_SETTING};
    pub use crate::effect::{CausticsEffect, FrameStatus};
    pub use crate::position_depth::PositionDepthPass;

    // Kernel and seed
    pub use crate::kernel::{
        GaussianKernel, MAX_RADIUS, normal_distribution,
        Clock, FixedClock, RandomSeedGenerator, SystemClock, SEED_CLOCK_MODULUS,
    };

    // Backend boundary
    pub use crate::device::{
        Device, Program, ProgramDesc, SurfaceDesc, SurfaceFormat, SurfaceInfo, SurfaceKey,
    };

    // Pipeline
    pub use crate::pipeline::{
        BufferRef, BufferSlot, IntermediateBuffer, IntermediateBufferDesc,
        ParameterBlock, ParameterValue, Pass, PassDesc,
        CausticsPrograms, FrameParameters, PostProcessPipeline,
        param_names, stage_names,
    };

    // Logging sub-module (types and logger installation; fx_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }
}

// Re-export math library at crate root
pub use glam;
