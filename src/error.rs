//! Error types shared by setup and the frame loop.

use thiserror::Error;

use crate::renderer::draw_unit::DrawUnitError;
use crate::renderer::frame::Viewport;

/// Shader stage named in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failures that abort initialisation.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    Adapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface supports no usable texture format")]
    SurfaceFormat,
    #[error("failed to compile {stage} shader for `{label}`:\n{log}")]
    ShaderCompile {
        label: String,
        stage: ShaderStage,
        log: String,
    },
    #[error("failed to link pipeline for `{label}`:\n{log}")]
    PipelineLink { label: String, log: String },
    #[error("unknown shader program {0}")]
    UnknownProgram(usize),
    #[error(transparent)]
    DrawUnit(#[from] DrawUnitError),
}

/// Failures while building or submitting a single frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("frame references unknown draw unit {0}")]
    UnknownUnit(usize),
    #[error("draw unit `{label}` cannot be drawn in the {viewport:?} pass")]
    IncompatiblePass { label: String, viewport: Viewport },
    #[error("draw unit `{label}` is drawn more than once in a frame")]
    DuplicateDraw { label: String },
}
