//! Error types for the screen caustics effect
//!
//! This module defines the error types used throughout the crate,
//! including parameter validation, pass setup and surface allocation.

use std::fmt;

/// Result type for caustics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caustics effect errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A parameter is outside of its accepted range (deviation <= 0, zero resolution, etc.)
    InvalidParameter(String),

    /// A pass has no processing program bound at execute time
    MissingKernel(String),

    /// The device could not allocate a requested surface
    BufferAllocationFailure(String),

    /// Backend-specific error raised by the device during invocation
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::MissingKernel(msg) => write!(f, "Missing kernel: {}", msg),
            Error::BufferAllocationFailure(msg) => write!(f, "Buffer allocation failure: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
