//! Procedural geometry.
//!
//! Everything the walker draws is generated here as flat, interleaved `f32`
//! vertex lists plus `u32` index lists. The functions are pure and
//! deterministic: the same grid always produces the same buffers, which makes
//! the mesh sizes easy to assert on in tests and keeps GPU code out of this
//! module entirely.
//!
//! # Module Organization
//! - [`walls`] extrudes an [`OccupancyGrid`](crate::maze::OccupancyGrid) into
//!   wall faces or full blocks
//! - [`fixtures`] holds the fixed quads: floor, skybox, sprite and minimap shapes

pub mod fixtures;
pub mod walls;

pub use fixtures::{
    floor_mesh, map_arrow_mesh, map_backdrop_mesh, map_square_mesh, map_square_offsets,
    skybox_mesh, sprite_mesh,
};
pub use walls::{
    block_mesh, cube_positions, east_face, north_face, south_face, wall_mesh, west_face,
};

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: f32 = 2.0;
/// Height of an extruded wall.
pub const WALL_HEIGHT: f32 = 2.0;
/// World `y` of the floor plane and of every wall's base.
pub const FLOOR_Y: f32 = -1.0;

/// Attribute layout of a [`MeshBuffer`]'s interleaved vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLayout {
    /// `x, y, z`
    Position,
    /// `x, y, z, u, v`
    PositionUv,
    /// `x, y, z` per vertex plus an `x, y` offset per instance.
    InstancedPosition,
}

impl VertexLayout {
    pub fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::Position | VertexLayout::InstancedPosition => 3,
            VertexLayout::PositionUv => 5,
        }
    }

    pub fn is_instanced(self) -> bool {
        matches!(self, VertexLayout::InstancedPosition)
    }
}

/// Interleaved vertices and triangle indices for one drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    layout: VertexLayout,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    instances: Vec<[f32; 2]>,
}

impl MeshBuffer {
    pub fn new(layout: VertexLayout, vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            layout,
            vertices,
            indices,
            instances: Vec::new(),
        }
    }

    /// Builds an indexed mesh, generating quad indices for every four vertices.
    pub fn quads(layout: VertexLayout, vertices: Vec<f32>) -> Self {
        let indices = generate_indices(vertices.len() / layout.floats_per_vertex());
        Self::new(layout, vertices, indices)
    }

    /// Attaches per-instance offsets.
    pub fn with_instances(mut self, instances: Vec<[f32; 2]>) -> Self {
        self.instances = instances;
        self
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn instances(&self) -> &[[f32; 2]] {
        &self.instances
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.floats_per_vertex()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Emits two triangles for every group of four vertices.
///
/// Each quad starting at vertex `i` becomes `(i, i+1, i+2)` and
/// `(i+1, i+3, i+2)`. A trailing partial group still gets its indices, so
/// callers are expected to pass a multiple of four.
pub fn generate_indices(num_vertices: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(num_vertices / 4 * 6);
    for i in (0..num_vertices as u32).step_by(4) {
        indices.extend_from_slice(&[i, i + 1, i + 2, i + 1, i + 3, i + 2]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_for_two_quads() {
        assert_eq!(
            generate_indices(8),
            vec![0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]
        );
    }

    #[test]
    fn no_vertices_no_indices() {
        assert!(generate_indices(0).is_empty());
    }

    #[test]
    fn quads_counts_vertices_by_layout() {
        let mesh = MeshBuffer::quads(VertexLayout::PositionUv, vec![0.0; 40]);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.instances().is_empty());
    }

    #[test]
    fn instanced_layout_is_flagged() {
        assert!(VertexLayout::InstancedPosition.is_instanced());
        assert!(!VertexLayout::Position.is_instanced());
        assert!(!VertexLayout::PositionUv.is_instanced());
    }
}
