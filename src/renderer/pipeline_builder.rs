//! # WGPU Pipeline Builder Utilities
//!
//! This module provides builder patterns and helper functions for creating WGPU render pipelines,
//! bind group layouts, and related resources. Shader modules and pipelines are created inside
//! validation error scopes so a bad shader surfaces as a [`SetupError`] carrying the driver's
//! diagnostic text instead of an uncaptured device error.
//!
//! ## Key Components
//!
//! - [`PipelineBuilder`] - Fluent API for creating render pipelines
//! - [`BindGroupLayoutBuilder`] - Fluent API for creating bind group layouts
//! - [`compile_shader`] - Error-scoped shader module creation
//! - Helpers mapping [`VertexLayout`] and [`DepthMode`] onto wgpu state
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let layout = BindGroupLayoutBuilder::new(&device)
//!     .with_label("Draw Unit Layout")
//!     .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
//!     .with_texture(1, wgpu::ShaderStages::FRAGMENT)
//!     .with_sampler(2, wgpu::ShaderStages::FRAGMENT)
//!     .build();
//!
//! let pipeline = PipelineBuilder::new(&device, surface_format)
//!     .with_label("walls")
//!     .with_shaders(&vertex_module, &fragment_module)
//!     .with_vertex_buffers(vertex_buffer_layouts(VertexLayout::PositionUv))
//!     .with_bind_group_layout(&layout)
//!     .with_no_culling()
//!     .build()?;
//! ```

use wgpu::util::DeviceExt;

use super::draw_unit::DepthMode;
use crate::error::{SetupError, ShaderStage};
use crate::mesh::VertexLayout;

/// Format of the main pass depth attachment.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Runs `create` inside a validation error scope and returns the captured
/// error message, if any.
fn capture_validation<T>(device: &wgpu::Device, create: impl FnOnce() -> T) -> (T, Option<String>) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let error = pollster::block_on(device.pop_error_scope());
    (value, error.map(|e| e.to_string()))
}

/// Creates a WGSL shader module, reporting compile errors with their log.
pub fn compile_shader(
    device: &wgpu::Device,
    label: &str,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, SetupError> {
    let (module, error) = capture_validation(device, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    });
    match error {
        Some(log) => Err(SetupError::ShaderCompile {
            label: label.to_string(),
            stage,
            log,
        }),
        None => Ok(module),
    }
}

/// Builder for one draw unit's render pipeline.
///
/// Starts from `vs_main`/`fs_main` entry points, a triangle list with
/// counter-clockwise front faces, back-face culling, no blending and no
/// depth attachment. Both shader modules are required.
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
    label: Option<&'a str>,
    vertex_module: Option<&'a wgpu::ShaderModule>,
    fragment_module: Option<&'a wgpu::ShaderModule>,
    vertex_entry: &'a str,
    fragment_entry: &'a str,
    vertex_buffers: Vec<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    blend_state: Option<wgpu::BlendState>,
    cull_mode: Option<wgpu::Face>,
    depth_stencil: Option<wgpu::DepthStencilState>,
}

impl<'a> PipelineBuilder<'a> {
    /// Targets `surface_format` with a single colour attachment.
    pub fn new(device: &'a wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            surface_format,
            label: None,
            vertex_module: None,
            fragment_module: None,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            vertex_buffers: Vec::new(),
            bind_group_layouts: Vec::new(),
            blend_state: Some(wgpu::BlendState::REPLACE),
            cull_mode: Some(wgpu::Face::Back),
            depth_stencil: None,
        }
    }

    /// Set the pipeline label for debugging purposes.
    ///
    /// The label is used for the pipeline and its layout, and names the unit
    /// in link errors.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the compiled vertex and fragment shader modules.
    pub fn with_shaders(
        mut self,
        vertex: &'a wgpu::ShaderModule,
        fragment: &'a wgpu::ShaderModule,
    ) -> Self {
        self.vertex_module = Some(vertex);
        self.fragment_module = Some(fragment);
        self
    }

    /// Add vertex buffer layouts, in slot order.
    pub fn with_vertex_buffers(mut self, layouts: Vec<wgpu::VertexBufferLayout<'a>>) -> Self {
        self.vertex_buffers.extend(layouts);
        self
    }

    /// Add a bind group layout to the pipeline.
    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    /// Enable standard alpha blending.
    ///
    /// - Color: `(SrcAlpha * src) + (OneMinusSrcAlpha * dst)`
    /// - Alpha: `(One * src) + (OneMinusSrcAlpha * dst)`
    pub fn with_alpha_blending(mut self) -> Self {
        self.blend_state = Some(wgpu::BlendState::ALPHA_BLENDING);
        self
    }

    /// Draws both windings.
    pub fn with_no_culling(mut self) -> Self {
        self.cull_mode = None;
        self
    }

    /// Set depth and stencil testing configuration.
    pub fn with_depth_stencil(mut self, depth_stencil: Option<wgpu::DepthStencilState>) -> Self {
        self.depth_stencil = depth_stencil;
        self
    }

    /// Build the render pipeline with the configured parameters.
    ///
    /// # Errors
    ///
    /// [`SetupError::PipelineLink`] when the shader modules are missing or
    /// when wgpu rejects the pipeline, e.g. because the vertex inputs do not
    /// match the shader's interface.
    pub fn build(self) -> Result<wgpu::RenderPipeline, SetupError> {
        let label = self.label.unwrap_or("unnamed pipeline");
        let (Some(vertex_module), Some(fragment_module)) = (self.vertex_module, self.fragment_module)
        else {
            return Err(SetupError::PipelineLink {
                label: label.to_string(),
                log: "shader modules must be provided".to_string(),
            });
        };

        let (pipeline, error) = capture_validation(self.device, || {
            let pipeline_layout =
                self.device
                    .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                        label: self.label,
                        bind_group_layouts: &self.bind_group_layouts,
                        push_constant_ranges: &[],
                    });

            self.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: self.label,
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: vertex_module,
                        entry_point: Some(self.vertex_entry),
                        buffers: &self.vertex_buffers,
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: fragment_module,
                        entry_point: Some(self.fragment_entry),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: self.surface_format,
                            blend: self.blend_state,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: self.cull_mode,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: self.depth_stencil.clone(),
                    multisample: wgpu::MultisampleState {
                        count: 1,
                        mask: !0,
                        alpha_to_coverage_enabled: false,
                    },
                    multiview: None,
                    cache: None,
                })
        });

        match error {
            Some(log) => Err(SetupError::PipelineLink {
                label: label.to_string(),
                log,
            }),
            None => Ok(pipeline),
        }
    }
}

/// Builder for bind group layouts made of uniform buffers, 2D float
/// textures and filtering samplers.
pub struct BindGroupLayoutBuilder<'a> {
    device: &'a wgpu::Device,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
    label: Option<&'a str>,
}

impl<'a> BindGroupLayoutBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            entries: Vec::new(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Add a 2D texture binding.
    ///
    /// In WGSL, access this texture with:
    /// ```wgsl
    /// @group(0) @binding(1) var t_diffuse: texture_2d<f32>;
    /// ```
    pub fn with_texture(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        });
        self
    }

    /// Add a filtering sampler binding.
    pub fn with_sampler(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        self
    }

    /// Add a uniform buffer binding.
    ///
    /// In WGSL, access this uniform buffer with:
    /// ```wgsl
    /// @group(0) @binding(0) var<uniform> uniforms: Uniforms;
    /// ```
    pub fn with_uniform_buffer(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    pub fn build(self) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &self.entries,
                label: self.label,
            })
    }
}

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const POSITION_UV_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
const INSTANCE_OFFSET_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x2];

/// Vertex buffer layouts for a mesh layout, in slot order.
///
/// Slot 0 always carries the interleaved vertices. Instanced layouts add a
/// per-instance `vec2<f32>` offset in slot 1 at shader location 1.
pub fn vertex_buffer_layouts(layout: VertexLayout) -> Vec<wgpu::VertexBufferLayout<'static>> {
    let stride = (layout.floats_per_vertex() * std::mem::size_of::<f32>()) as wgpu::BufferAddress;
    let per_vertex = |attributes: &'static [wgpu::VertexAttribute]| wgpu::VertexBufferLayout {
        array_stride: stride,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    };

    match layout {
        VertexLayout::Position => vec![per_vertex(&POSITION_ATTRIBUTES)],
        VertexLayout::PositionUv => vec![per_vertex(&POSITION_UV_ATTRIBUTES)],
        VertexLayout::InstancedPosition => vec![
            per_vertex(&POSITION_ATTRIBUTES),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_OFFSET_ATTRIBUTES,
            },
        ],
    }
}

/// Depth state for a unit drawn with `mode`.
pub fn depth_stencil_state(mode: DepthMode) -> Option<wgpu::DepthStencilState> {
    let (depth_write_enabled, depth_compare) = match mode {
        DepthMode::Test => (true, wgpu::CompareFunction::Less),
        DepthMode::Background => (false, wgpu::CompareFunction::Always),
        DepthMode::Disabled => return None,
    };
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

/// Helper for creating uniform buffers
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: &str,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(std::slice::from_ref(data)),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_mesh_strides() {
        let uv = vertex_buffer_layouts(VertexLayout::PositionUv);
        assert_eq!(uv.len(), 1);
        assert_eq!(uv[0].array_stride, 20);
        assert_eq!(uv[0].attributes[1].offset, 12);

        let instanced = vertex_buffer_layouts(VertexLayout::InstancedPosition);
        assert_eq!(instanced.len(), 2);
        assert_eq!(instanced[0].array_stride, 12);
        assert_eq!(instanced[1].step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(instanced[1].attributes[0].shader_location, 1);
    }

    #[test]
    fn depth_modes_map_to_depth_state() {
        let test = depth_stencil_state(DepthMode::Test).unwrap();
        assert!(test.depth_write_enabled);
        assert_eq!(test.depth_compare, wgpu::CompareFunction::Less);

        let background = depth_stencil_state(DepthMode::Background).unwrap();
        assert!(!background.depth_write_enabled);
        assert_eq!(background.depth_compare, wgpu::CompareFunction::Always);

        assert!(depth_stencil_state(DepthMode::Disabled).is_none());
    }
}
