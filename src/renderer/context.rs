//! The graphics boundary.
//!
//! Scenes only talk to the GPU through [`GraphicsContext`]. The wgpu backend
//! implements it for real rendering; tests use a recording double.

use super::draw_unit::{DrawUnitDesc, DrawUnitId, ProgramHandle};
use super::frame::Frame;
use crate::error::{RenderError, SetupError};

pub trait GraphicsContext {
    /// Compiles a vertex/fragment shader pair.
    ///
    /// Fails with the backend's diagnostic text when either stage is invalid.
    fn compile(
        &mut self,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramHandle, SetupError>;

    /// Uploads a unit's mesh and texture and links its pipeline.
    fn create_draw_unit(&mut self, desc: &DrawUnitDesc) -> Result<DrawUnitId, SetupError>;

    /// Adapts render targets to a new window size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Executes a frame.
    fn submit(&mut self, frame: &Frame) -> Result<(), RenderError>;
}
