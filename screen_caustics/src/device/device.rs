//! Device trait - backend boundary for surfaces and program invocation

use std::sync::Arc;
use crate::error::Result;
use crate::pipeline::ParameterBlock;
use super::program::{Program, ProgramDesc};
use super::surface::{SurfaceDesc, SurfaceInfo, SurfaceKey};

/// Backend used by the pipeline to allocate surfaces and run programs
///
/// Calls are made from a single thread, once per frame. A device owns
/// every surface it creates, including the host's source/destination
/// surfaces which the pipeline only borrows by key.
pub trait Device {
    /// Allocate a surface
    ///
    /// # Errors
    ///
    /// Returns `BufferAllocationFailure` if the surface cannot be allocated.
    fn create_surface(&mut self, desc: &SurfaceDesc) -> Result<SurfaceKey>;

    /// Release a surface (no-op for unknown keys)
    fn destroy_surface(&mut self, surface: SurfaceKey);

    /// Get the properties of a live surface
    fn surface_info(&self, surface: SurfaceKey) -> Option<SurfaceInfo>;

    /// Create a processing program
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>>;

    /// Run `program` with `params` bound, reading `inputs` and writing `output`
    fn invoke(
        &mut self,
        program: &Arc<dyn Program>,
        params: &ParameterBlock,
        inputs: &[SurfaceKey],
        output: SurfaceKey,
    ) -> Result<()>;
}
