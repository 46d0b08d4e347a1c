//! Surface keys, formats and descriptors

use slotmap::new_key_type;

new_key_type! {
    /// Stable key for a surface owned by a `Device`.
    ///
    /// A key becomes invalid only when its own surface is destroyed;
    /// keys of destroyed surfaces are never handed out again.
    pub struct SurfaceKey;
}

/// Surface pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum SurfaceFormat {
    R8G8B8A8_UNORM,
    R32G32B32A32_SFLOAT,
}

/// Descriptor for creating a surface
#[derive(Debug, Clone)]
pub struct SurfaceDesc {
    /// Debug name (e.g. "causticOutput")
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: SurfaceFormat,
}

/// Read-only properties of a created surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
    pub format: SurfaceFormat,
}
