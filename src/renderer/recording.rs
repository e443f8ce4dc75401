//! In-memory [`GraphicsContext`] for tests.

use super::context::GraphicsContext;
use super::draw_unit::{DrawUnitDesc, DrawUnitId, ProgramHandle};
use super::frame::Frame;
use crate::error::{RenderError, SetupError, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedProgram {
    pub label: String,
    pub vertex_src: String,
    pub fragment_src: String,
}

/// Records every call instead of touching a GPU.
///
/// Programs and units are validated the same way the wgpu backend validates
/// them, so scene wiring errors surface in unit tests.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub programs: Vec<RecordedProgram>,
    pub units: Vec<DrawUnitDesc>,
    pub resizes: Vec<(u32, u32)>,
    pub frames: Vec<Frame>,
    /// Program label whose compile should fail.
    pub fail_compile: Option<String>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(&self, id: DrawUnitId) -> &DrawUnitDesc {
        &self.units[id.index()]
    }

    pub fn unit_named(&self, label: &str) -> Option<(DrawUnitId, &DrawUnitDesc)> {
        self.units
            .iter()
            .enumerate()
            .find(|(_, unit)| unit.label() == label)
            .map(|(i, unit)| (DrawUnitId::new(i), unit))
    }

    pub fn program(&self, handle: ProgramHandle) -> &RecordedProgram {
        &self.programs[handle.index()]
    }
}

impl GraphicsContext for RecordingContext {
    fn compile(
        &mut self,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramHandle, SetupError> {
        if self.fail_compile.as_deref() == Some(label) {
            return Err(SetupError::ShaderCompile {
                label: label.to_string(),
                stage: ShaderStage::Vertex,
                log: "recorded failure".to_string(),
            });
        }
        self.programs.push(RecordedProgram {
            label: label.to_string(),
            vertex_src: vertex_src.to_string(),
            fragment_src: fragment_src.to_string(),
        });
        Ok(ProgramHandle::new(self.programs.len() - 1))
    }

    fn create_draw_unit(&mut self, desc: &DrawUnitDesc) -> Result<DrawUnitId, SetupError> {
        if desc.program().index() >= self.programs.len() {
            return Err(SetupError::UnknownProgram(desc.program().index()));
        }
        self.units.push(desc.clone());
        Ok(DrawUnitId::new(self.units.len() - 1))
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), RenderError> {
        frame.validate(|id| {
            self.units
                .get(id.index())
                .map(|unit| (unit.label(), unit.depth_mode()))
        })?;
        self.frames.push(frame.clone());
        Ok(())
    }
}
