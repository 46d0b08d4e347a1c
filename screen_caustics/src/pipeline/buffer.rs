//! Buffers connecting the passes of a pipeline.
//!
//! Intermediate buffers are owned by the pipeline and reallocated
//! whenever the output resolution changes. The source and destination
//! surfaces belong to the host and are only borrowed for one execute.
//!
//! Unlike a DAG edge, an intermediate buffer may be written by several
//! passes (ping-pong between `causticOutput` and `blurOutput`); the
//! pipeline only requires that it is written before it is first read.

use crate::device::{SurfaceFormat, SurfaceKey};

/// Buffer reference in a pass descriptor (by name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferSlot {
    /// Host surface holding the rendered scene
    Source,
    /// Host surface receiving the composited image
    Destination,
    /// Intermediate buffer owned by the pipeline
    Named(String),
}

impl BufferSlot {
    pub fn named(name: &str) -> Self {
        BufferSlot::Named(name.to_string())
    }
}

/// Resolved buffer reference (intermediates by index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRef {
    Source,
    Destination,
    Intermediate(usize),
}

/// Descriptor for an intermediate buffer
#[derive(Debug, Clone)]
pub struct IntermediateBufferDesc {
    pub name: String,
    pub format: SurfaceFormat,
}

impl IntermediateBufferDesc {
    pub fn new(name: &str, format: SurfaceFormat) -> Self {
        Self { name: name.to_string(), format }
    }
}

/// Pipeline-owned scratch surface
pub struct IntermediateBuffer {
    name: String,
    format: SurfaceFormat,
    /// Device surface, None until the pipeline is configured
    surface: Option<SurfaceKey>,
    width: u32,
    height: u32,
    /// Index of the first pass writing this buffer
    first_writer: Option<usize>,
}

impl IntermediateBuffer {
    pub(crate) fn new(desc: IntermediateBufferDesc) -> Self {
        Self {
            name: desc.name,
            format: desc.format,
            surface: None,
            width: 0,
            height: 0,
            first_writer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    /// Get the device surface backing this buffer
    pub fn surface(&self) -> Option<SurfaceKey> {
        self.surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the index of the first pass writing this buffer
    pub fn first_writer(&self) -> Option<usize> {
        self.first_writer
    }

    pub(crate) fn set_first_writer(&mut self, pass_id: usize) {
        if self.first_writer.is_none() {
            self.first_writer = Some(pass_id);
        }
    }

    pub(crate) fn attach(&mut self, surface: SurfaceKey, width: u32, height: u32) {
        self.surface = Some(surface);
        self.width = width;
        self.height = height;
    }

    /// Detach the surface, returning it so the caller can release it
    pub(crate) fn detach(&mut self) -> Option<SurfaceKey> {
        self.width = 0;
        self.height = 0;
        self.surface.take()
    }
}
