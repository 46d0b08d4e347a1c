//! Program trait and program descriptor
//!
//! A program is an opaque processing kernel owned by the backend
//! (caustics sampling, median filter, directional blur, composite).
//! The pipeline only references it; what it computes is up to the backend.

/// Processing program created by a `Device`
pub trait Program: Send + Sync {
    /// Program name (used for logging and error reporting)
    fn name(&self) -> &str;
}

/// Descriptor for creating a program
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    /// Backend-specific program name (shader name, entry point...)
    pub name: String,
}
