//! Main renderer module.
//!
//! This module contains the draw-unit abstraction, per-frame render commands and the wgpu
//! implementation of the [`GraphicsContext`] boundary. Scenes describe what to draw; only
//! [`wgpu_lib`] touches the GPU.

/// The trait scenes render through.
pub mod context;
/// Draw-unit descriptions and their builder.
pub mod draw_unit;
/// Passes, viewports and per-draw uniforms.
pub mod frame;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Image-file and procedural textures.
pub mod texture;
/// GPU layout of the shared uniform block.
pub mod uniform;
/// Core WGPU library and utilities.
pub mod wgpu_lib;

#[cfg(test)]
pub mod recording;

pub use context::GraphicsContext;
pub use draw_unit::{DrawUnitBuilder, DrawUnitDesc, DrawUnitId, ProgramHandle};
pub use frame::{DrawCall, DrawUniforms, Frame, Pass, ScreenLayout, Viewport};
pub use wgpu_lib::WgpuRenderer;
