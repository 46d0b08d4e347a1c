//! Named parameter table bound to a program before invocation.
//!
//! A ParameterBlock is an ordered set of named, typed values (scalars,
//! vectors, float arrays, surfaces). Each pass owns one, and the
//! pipeline owns a shared block that acts as the default layer for
//! every pass. Names follow the uniform names of the target programs
//! (e.g. `_CausticStrength`, `_PassDirection`).

use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::device::SurfaceKey;

// ===== PARAMETER VALUES =====

/// A typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Int(i32),
    Vector(Vec4),
    FloatArray(Vec<f32>),
    Surface(SurfaceKey),
}

// ===== PARAMETER BLOCK =====

/// Ordered name -> value table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBlock {
    params: Vec<(String, ParameterValue)>,
    param_names: FxHashMap<String, usize>,
}

impl ParameterBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value with the same name
    pub fn set(&mut self, name: &str, value: ParameterValue) {
        match self.param_names.get(name) {
            Some(&idx) => self.params[idx].1 = value,
            None => {
                self.param_names.insert(name.to_string(), self.params.len());
                self.params.push((name.to_string(), value));
            }
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, ParameterValue::Float(value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, ParameterValue::Int(value));
    }

    pub fn set_vector(&mut self, name: &str, value: Vec4) {
        self.set(name, ParameterValue::Vector(value));
    }

    pub fn set_float_array(&mut self, name: &str, values: &[f32]) {
        self.set(name, ParameterValue::FloatArray(values.to_vec()));
    }

    pub fn set_surface(&mut self, name: &str, surface: SurfaceKey) {
        self.set(name, ParameterValue::Surface(surface));
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        let idx = self.param_names.get(name)?;
        self.params.get(*idx).map(|(_, v)| v)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            ParameterValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ParameterValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vector(&self, name: &str) -> Option<Vec4> {
        match self.get(name)? {
            ParameterValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float_array(&self, name: &str) -> Option<&[f32]> {
        match self.get(name)? {
            ParameterValue::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn surface(&self, name: &str) -> Option<SurfaceKey> {
        match self.get(name)? {
            ParameterValue::Surface(v) => Some(*v),
            _ => None,
        }
    }

    /// Remove a value by name
    ///
    /// Returns the removed value, or None if not found.
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        let idx = self.param_names.remove(name)?;
        let (_, value) = self.params.remove(idx);
        for slot in self.param_names.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Iterate over (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Layer `overrides` on top of this block
    ///
    /// Values from `overrides` win on name collisions.
    pub fn merged_with(&self, overrides: &ParameterBlock) -> ParameterBlock {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.set(name, value.clone());
        }
        merged
    }
}

#[cfg(test)]
#[path = "parameter_block_tests.rs"]
mod tests;
