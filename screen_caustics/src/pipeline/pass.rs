//! Pass node in a post-processing pipeline.
//!
//! A pass binds one program to up to two input buffers, exactly one
//! output buffer and its own parameter block. The program slot may be
//! empty (e.g. a shader the host failed to load); the pipeline refuses
//! to execute until every slot is filled.

use std::sync::Arc;
use crate::device::Program;
use super::buffer::{BufferRef, BufferSlot};
use super::parameter_block::ParameterBlock;

/// Maximum number of inputs a pass may read
pub const MAX_PASS_INPUTS: usize = 2;

/// Pass creation descriptor
pub struct PassDesc {
    pub name: String,
    pub program: Option<Arc<dyn Program>>,
    pub inputs: Vec<BufferSlot>,
    pub output: BufferSlot,
    pub params: ParameterBlock,
}

impl PassDesc {
    pub fn new(name: &str, program: Option<Arc<dyn Program>>, inputs: Vec<BufferSlot>, output: BufferSlot) -> Self {
        Self {
            name: name.to_string(),
            program,
            inputs,
            output,
            params: ParameterBlock::new(),
        }
    }

    /// Attach a per-pass parameter block
    pub fn with_params(mut self, params: ParameterBlock) -> Self {
        self.params = params;
        self
    }
}

pub struct Pass {
    name: String,
    program: Option<Arc<dyn Program>>,
    inputs: Vec<BufferRef>,
    output: BufferRef,
    params: ParameterBlock,
}

impl Pass {
    pub(crate) fn new(
        name: String,
        program: Option<Arc<dyn Program>>,
        inputs: Vec<BufferRef>,
        output: BufferRef,
        params: ParameterBlock,
    ) -> Self {
        Self { name, program, inputs, output, params }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the bound program, if any
    pub fn program(&self) -> Option<&Arc<dyn Program>> {
        self.program.as_ref()
    }

    pub(crate) fn set_program(&mut self, program: Option<Arc<dyn Program>>) {
        self.program = program;
    }

    pub fn inputs(&self) -> &[BufferRef] {
        &self.inputs
    }

    pub fn output(&self) -> BufferRef {
        self.output
    }

    /// Per-pass parameters (override the pipeline's shared parameters)
    pub fn params(&self) -> &ParameterBlock {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterBlock {
        &mut self.params
    }
}
