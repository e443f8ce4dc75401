//! Uniform buffer layout shared by every shader.
//!
//! This module provides [`UniformBlock`], the `#[repr(C)]` mirror of the WGSL
//! `Uniforms` struct bound at group 0, binding 0 by all draw units.

use super::frame::DrawUniforms;

/// GPU layout of [`DrawUniforms`].
///
/// Three matrices, a colour and a texture offset, padded to a multiple of 16
/// bytes as WGSL uniform layout rules require.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformBlock {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub uv_offset: [f32; 2],
    pub _padding: [f32; 2],
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self::from(&DrawUniforms::default())
    }
}

impl From<&DrawUniforms> for UniformBlock {
    fn from(uniforms: &DrawUniforms) -> Self {
        Self {
            model: uniforms.model.into(),
            view: uniforms.view.into(),
            projection: uniforms.projection.into(),
            color: uniforms.color,
            uv_offset: uniforms.uv_offset,
            _padding: [0.0; 2],
        }
    }
}

impl UniformBlock {
    /// Returns the raw bytes of the uniform struct for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
