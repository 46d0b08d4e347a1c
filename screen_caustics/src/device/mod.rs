//! Device boundary
//!
//! The caustics pipeline never touches pixels itself. Surface allocation
//! and program invocation are delegated to a backend implementing the
//! `Device` trait (GPU renderer, host engine bridge, CPU reference...).

mod device;
mod program;
mod surface;

#[cfg(test)]
pub(crate) mod mock_device;

pub use device::Device;
pub use program::{Program, ProgramDesc};
pub use surface::{SurfaceDesc, SurfaceFormat, SurfaceInfo, SurfaceKey};
