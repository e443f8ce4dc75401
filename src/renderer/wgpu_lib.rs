//! WGPU-based renderer for the maze walker.
//!
//! This module provides [`WgpuRenderer`], the [`GraphicsContext`] that owns the
//! device, the surface and every GPU resource created for draw units. It
//! handles initialization of WGPU, uploads each unit's vertex, index and
//! instance buffers once, and executes [`Frame`]s pass by pass.
//!
//! # Features
//! - Error-scoped shader compilation and pipeline creation
//! - One uniform buffer per draw unit, rewritten every frame
//! - Depth buffering for the main viewport, re-created on resize
//! - Letterboxed viewports from the frame's [`ScreenLayout`](super::frame::ScreenLayout)
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`], build draw units through
//! the [`GraphicsContext`] trait and call [`GraphicsContext::submit`] each frame.

use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};
use wgpu::util::DeviceExt;

use super::context::GraphicsContext;
use super::draw_unit::{Blend, DepthMode, DrawMode, DrawUnitDesc, DrawUnitId, ProgramHandle, WrapMode};
use super::frame::{Frame, Pass, Viewport, ViewportRect};
use super::pipeline_builder::{
    BindGroupLayoutBuilder, DEPTH_FORMAT, PipelineBuilder, compile_shader, create_uniform_buffer,
    depth_stencil_state, vertex_buffer_layouts,
};
use super::uniform::UniformBlock;
use crate::error::{RenderError, SetupError, ShaderStage};

struct CompiledProgram {
    label: String,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

/// Mesh buffers for a unit with geometry. Units with an empty mesh have none.
struct GeometryBuffers {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    instance_buffer: Option<wgpu::Buffer>,
}

struct GpuDrawUnit {
    label: String,
    depth_mode: DepthMode,
    draw_mode: DrawMode,
    pipeline: wgpu::RenderPipeline,
    geometry: Option<GeometryBuffers>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Main WGPU renderer.
///
/// Draw units are stored in creation order; a [`DrawUnitId`] is an index
/// into that list.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    programs: Vec<CompiledProgram>,
    units: Vec<GpuDrawUnit>,
}

impl WgpuRenderer {
    /// Initializes the device and configures `surface` at `width` x `height`.
    ///
    /// # Errors
    ///
    /// Fails when no adapter can present to the surface, when the device
    /// cannot be created or when the surface reports no texture formats.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, SetupError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        info!(adapter = %adapter.get_info().name, backend = ?adapter.get_info().backend, "selected graphics adapter");
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);

        let bind_group_layout = BindGroupLayoutBuilder::new(&device)
            .with_label("Draw Unit Bind Group Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)
            .with_texture(1, wgpu::ShaderStages::FRAGMENT)
            .with_sampler(2, wgpu::ShaderStages::FRAGMENT)
            .build();
        let depth_view =
            Self::create_depth_view(&device, surface_config.width, surface_config.height);

        info!(
            format = ?surface_config.format,
            width = surface_config.width,
            height = surface_config.height,
            "renderer initialised"
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            bind_group_layout,
            depth_view,
            programs: Vec::new(),
            units: Vec::new(),
        })
    }

    // Private helper methods

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, SetupError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(SetupError::Adapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), SetupError> {
        let device = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok(device)
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, SetupError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|&&f| f == wgpu::TextureFormat::Bgra8UnormSrgb)
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(SetupError::SurfaceFormat)?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn upload_texture(&self, label: &str, image: &RgbaImage) -> wgpu::TextureView {
        let dimensions = image.dimensions();
        let texture_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            image,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            texture_size,
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_sampler(&self, wrap: WrapMode) -> wgpu::Sampler {
        let address_mode = match wrap {
            WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
        };
        self.device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }

    fn upload_geometry(&self, desc: &DrawUnitDesc) -> Option<GeometryBuffers> {
        let mesh = desc.mesh();
        if mesh.is_empty() {
            return None;
        }

        let buffer = |name: &str, contents: &[u8], usage: wgpu::BufferUsages| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} {name}", desc.label())),
                    contents,
                    usage,
                })
        };

        let vertex_buffer = buffer(
            "Vertex Buffer",
            bytemuck::cast_slice(mesh.vertices()),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = (!mesh.indices().is_empty()).then(|| {
            buffer(
                "Index Buffer",
                bytemuck::cast_slice(mesh.indices()),
                wgpu::BufferUsages::INDEX,
            )
        });
        let instance_buffer = (!mesh.instances().is_empty()).then(|| {
            buffer(
                "Instance Buffer",
                bytemuck::cast_slice(mesh.instances()),
                wgpu::BufferUsages::VERTEX,
            )
        });

        Some(GeometryBuffers {
            vertex_buffer,
            vertex_count: mesh.vertex_count() as u32,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            instance_buffer,
        })
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        rect: ViewportRect,
        pass: &Pass,
    ) {
        let load = match pass.clear {
            Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            }),
            None => wgpu::LoadOp::Load,
        };
        let depth_stencil_attachment =
            (pass.viewport == Viewport::Main).then(|| wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(match pass.viewport {
                Viewport::Main => "Main Render Pass",
                Viewport::Map => "Map Render Pass",
            }),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_viewport(rect.x, rect.y, rect.width, rect.height, 0.0, 1.0);

        for draw in &pass.draws {
            let Some(unit) = self.units.get(draw.unit.index()) else {
                continue;
            };
            let Some(geometry) = &unit.geometry else {
                continue;
            };

            render_pass.set_pipeline(&unit.pipeline);
            render_pass.set_bind_group(0, &unit.bind_group, &[]);
            render_pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));

            match (unit.draw_mode, &geometry.index_buffer) {
                (DrawMode::Arrays, _) | (_, None) => {
                    render_pass.draw(0..geometry.vertex_count, 0..1);
                }
                (DrawMode::Indexed, Some(index_buffer)) => {
                    render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..geometry.index_count, 0, 0..1);
                }
                (DrawMode::InstancedIndexed { instances }, Some(index_buffer)) => {
                    let Some(instance_buffer) = &geometry.instance_buffer else {
                        continue;
                    };
                    render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
                    render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..geometry.index_count, 0, 0..instances);
                }
            }
        }
    }
}

impl GraphicsContext for WgpuRenderer {
    fn compile(
        &mut self,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramHandle, SetupError> {
        let vertex = compile_shader(&self.device, label, ShaderStage::Vertex, vertex_src)?;
        let fragment = compile_shader(&self.device, label, ShaderStage::Fragment, fragment_src)?;
        debug!(label, "compiled shader program");

        self.programs.push(CompiledProgram {
            label: label.to_string(),
            vertex,
            fragment,
        });
        Ok(ProgramHandle::new(self.programs.len() - 1))
    }

    fn create_draw_unit(&mut self, desc: &DrawUnitDesc) -> Result<DrawUnitId, SetupError> {
        let program = self
            .programs
            .get(desc.program().index())
            .ok_or(SetupError::UnknownProgram(desc.program().index()))?;

        let mut builder = PipelineBuilder::new(&self.device, self.surface_config.format)
            .with_label(desc.label())
            .with_shaders(&program.vertex, &program.fragment)
            .with_vertex_buffers(vertex_buffer_layouts(desc.mesh().layout()))
            .with_bind_group_layout(&self.bind_group_layout)
            .with_no_culling()
            .with_depth_stencil(depth_stencil_state(desc.depth_mode()));
        if desc.blend() == Blend::Alpha {
            builder = builder.with_alpha_blending();
        }
        let pipeline = builder.build()?;

        let (image, wrap) = match desc.texture() {
            Some(binding) => (binding.source.load(), binding.wrap),
            None => (RgbaImage::from_pixel(1, 1, Rgba([255; 4])), WrapMode::Clamp),
        };
        let texture_view = self.upload_texture(desc.label(), &image);
        let sampler = self.create_sampler(wrap);
        let uniform_buffer = create_uniform_buffer(
            &self.device,
            &UniformBlock::default(),
            &format!("{} Uniform Buffer", desc.label()),
        );

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some(desc.label()),
        });

        let geometry = self.upload_geometry(desc);
        debug!(
            label = desc.label(),
            program = %program.label,
            vertices = desc.mesh().vertex_count(),
            triangles = desc.mesh().triangle_count(),
            instances = desc.mesh().instances().len(),
            "created draw unit"
        );

        self.units.push(GpuDrawUnit {
            label: desc.label().to_string(),
            depth_mode: desc.depth_mode(),
            draw_mode: desc.draw_mode(),
            pipeline,
            geometry,
            uniform_buffer,
            bind_group,
        });
        Ok(DrawUnitId::new(self.units.len() - 1))
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to an empty window");
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, width, height);
        info!(width, height, "resized render targets");
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), RenderError> {
        frame.validate(|id| {
            self.units
                .get(id.index())
                .map(|unit| (unit.label.as_str(), unit.depth_mode))
        })?;
        if frame.layout.is_empty() {
            return Ok(());
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!(error = %e, "surface needs reconfiguring, skipping frame");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        for draw in frame.passes.iter().flat_map(|pass| &pass.draws) {
            if let Some(unit) = self.units.get(draw.unit.index()) {
                let block = UniformBlock::from(&draw.uniforms);
                self.queue
                    .write_buffer(&unit.uniform_buffer, 0, block.as_bytes());
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        for pass in &frame.passes {
            let rect = frame.layout.rect(pass.viewport);
            if rect.is_empty() {
                continue;
            }
            self.encode_pass(&mut encoder, &surface_view, rect, pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
