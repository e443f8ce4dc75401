//! Draw-unit descriptions.
//!
//! A draw unit is one self-contained renderable: a mesh, the shader program
//! that draws it, an optional texture and the fixed-function state it needs.
//! Scenes describe units once at setup with [`DrawUnitBuilder`]; the graphics
//! backend turns each description into GPU buffers and a pipeline and hands
//! back a [`DrawUnitId`] to reference it in frames.
//!
//! ```
//! use mazewalk::mesh::floor_mesh;
//! use mazewalk::renderer::draw_unit::{DepthMode, DrawUnitBuilder, ProgramHandle, WrapMode};
//! use mazewalk::renderer::texture::{Pattern, TextureSource};
//!
//! let desc = DrawUnitBuilder::new("floor")
//!     .mesh(floor_mesh())
//!     .program(ProgramHandle::new(0))
//!     .texture(TextureSource::Procedural(Pattern::Rocks), WrapMode::Repeat)
//!     .depth(DepthMode::Test)
//!     .build()
//!     .unwrap();
//! assert_eq!(desc.label(), "floor");
//! ```

use thiserror::Error;

use super::texture::TextureSource;
use crate::mesh::MeshBuffer;

/// A compiled vertex/fragment shader pair owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(usize);

impl ProgramHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A draw unit created on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawUnitId(usize);

impl DrawUnitId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Triangles from the mesh's index list.
    Indexed,
    /// Triangles straight from the vertex list.
    Arrays,
    /// The index list once per instance offset.
    InstancedIndexed { instances: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// Depth-tested and depth-written.
    Test,
    /// Drawn behind everything: always passes, never writes.
    Background,
    /// No depth attachment at all.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Opaque,
    Alpha,
}

/// Texture addressing outside `0..1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub source: TextureSource,
    pub wrap: WrapMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawUnitError {
    #[error("draw unit `{0}` has no mesh")]
    MissingMesh(String),
    #[error("draw unit `{0}` has no shader program")]
    MissingProgram(String),
    #[error("draw unit `{0}` draws indexed but its mesh has no indices")]
    MissingIndices(String),
    #[error("draw unit `{0}` requests instancing on a mesh without an instanced layout")]
    NotInstanced(String),
    #[error("draw unit `{label}` requests {requested} instances but its mesh has {available}")]
    MissingInstances {
        label: String,
        requested: u32,
        available: usize,
    },
}

/// Validated description of a draw unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawUnitDesc {
    label: String,
    mesh: MeshBuffer,
    program: ProgramHandle,
    texture: Option<TextureBinding>,
    draw_mode: DrawMode,
    depth_mode: DepthMode,
    blend: Blend,
}

impl DrawUnitDesc {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn texture(&self) -> Option<&TextureBinding> {
        self.texture.as_ref()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn depth_mode(&self) -> DepthMode {
        self.depth_mode
    }

    pub fn blend(&self) -> Blend {
        self.blend
    }
}

/// Fluent builder for [`DrawUnitDesc`].
///
/// Defaults to indexed drawing, depth testing and opaque blending with no
/// texture. A mesh and a program are required. An empty mesh is accepted and
/// draws nothing.
#[derive(Debug, Clone)]
pub struct DrawUnitBuilder {
    label: String,
    mesh: Option<MeshBuffer>,
    program: Option<ProgramHandle>,
    texture: Option<TextureBinding>,
    draw_mode: DrawMode,
    depth_mode: DepthMode,
    blend: Blend,
}

impl DrawUnitBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mesh: None,
            program: None,
            texture: None,
            draw_mode: DrawMode::Indexed,
            depth_mode: DepthMode::Test,
            blend: Blend::Opaque,
        }
    }

    pub fn mesh(mut self, mesh: MeshBuffer) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn program(mut self, program: ProgramHandle) -> Self {
        self.program = Some(program);
        self
    }

    pub fn texture(mut self, source: TextureSource, wrap: WrapMode) -> Self {
        self.texture = Some(TextureBinding { source, wrap });
        self
    }

    pub fn draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    pub fn depth(mut self, depth_mode: DepthMode) -> Self {
        self.depth_mode = depth_mode;
        self
    }

    pub fn blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub fn build(self) -> Result<DrawUnitDesc, DrawUnitError> {
        let Some(mesh) = self.mesh else {
            return Err(DrawUnitError::MissingMesh(self.label));
        };
        let Some(program) = self.program else {
            return Err(DrawUnitError::MissingProgram(self.label));
        };

        match self.draw_mode {
            DrawMode::Indexed if mesh.indices().is_empty() && !mesh.is_empty() => {
                return Err(DrawUnitError::MissingIndices(self.label));
            }
            DrawMode::InstancedIndexed { instances } => {
                if !mesh.layout().is_instanced() {
                    return Err(DrawUnitError::NotInstanced(self.label));
                }
                if mesh.indices().is_empty() && !mesh.is_empty() {
                    return Err(DrawUnitError::MissingIndices(self.label));
                }
                if mesh.instances().len() < instances as usize {
                    return Err(DrawUnitError::MissingInstances {
                        label: self.label,
                        requested: instances,
                        available: mesh.instances().len(),
                    });
                }
            }
            _ => {}
        }

        Ok(DrawUnitDesc {
            label: self.label,
            mesh,
            program,
            texture: self.texture,
            draw_mode: self.draw_mode,
            depth_mode: self.depth_mode,
            blend: self.blend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::OccupancyGrid;
    use crate::mesh::{map_arrow_mesh, map_square_mesh, map_square_offsets, wall_mesh};

    #[test]
    fn builder_defaults() {
        let desc = DrawUnitBuilder::new("arrow")
            .mesh(map_arrow_mesh())
            .program(ProgramHandle::new(3))
            .draw_mode(DrawMode::Arrays)
            .build()
            .unwrap();
        assert_eq!(desc.depth_mode(), DepthMode::Test);
        assert_eq!(desc.blend(), Blend::Opaque);
        assert_eq!(desc.program().index(), 3);
        assert!(desc.texture().is_none());
    }

    #[test]
    fn mesh_and_program_are_required() {
        assert_eq!(
            DrawUnitBuilder::new("walls")
                .program(ProgramHandle::new(0))
                .build(),
            Err(DrawUnitError::MissingMesh("walls".into()))
        );
        assert_eq!(
            DrawUnitBuilder::new("walls")
                .mesh(wall_mesh(&OccupancyGrid::default_maze()))
                .build(),
            Err(DrawUnitError::MissingProgram("walls".into()))
        );
    }

    #[test]
    fn instancing_requires_an_instanced_layout() {
        let result = DrawUnitBuilder::new("walls")
            .mesh(wall_mesh(&OccupancyGrid::default_maze()))
            .program(ProgramHandle::new(0))
            .draw_mode(DrawMode::InstancedIndexed { instances: 4 })
            .build();
        assert_eq!(result, Err(DrawUnitError::NotInstanced("walls".into())));
    }

    #[test]
    fn instancing_requires_enough_offsets() {
        let grid = OccupancyGrid::from_rows(&["#.#"]).unwrap();
        let mesh = map_square_mesh().with_instances(map_square_offsets(&grid));

        let ok = DrawUnitBuilder::new("squares")
            .mesh(mesh.clone())
            .program(ProgramHandle::new(1))
            .draw_mode(DrawMode::InstancedIndexed { instances: 2 })
            .build();
        assert!(ok.is_ok());

        let too_many = DrawUnitBuilder::new("squares")
            .mesh(mesh)
            .program(ProgramHandle::new(1))
            .draw_mode(DrawMode::InstancedIndexed { instances: 3 })
            .build();
        assert_eq!(
            too_many,
            Err(DrawUnitError::MissingInstances {
                label: "squares".into(),
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn empty_mesh_is_a_valid_unit() {
        let empty = OccupancyGrid::new(2, 2, vec![0; 4]).unwrap();
        let desc = DrawUnitBuilder::new("walls")
            .mesh(wall_mesh(&empty))
            .program(ProgramHandle::new(0))
            .build()
            .unwrap();
        assert!(desc.mesh().is_empty());
    }

    #[test]
    fn indexed_drawing_needs_indices() {
        let result = DrawUnitBuilder::new("arrow")
            .mesh(map_arrow_mesh())
            .program(ProgramHandle::new(0))
            .build();
        assert_eq!(result, Err(DrawUnitError::MissingIndices("arrow".into())));
    }
}
