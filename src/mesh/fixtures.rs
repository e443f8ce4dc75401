//! Fixed quads that do not depend on the maze layout, plus the minimap's
//! per-wall instance offsets.

use super::{FLOOR_Y, MeshBuffer, VertexLayout};
use crate::maze::OccupancyGrid;

const FLOOR_HALF_EXTENT: f32 = 16.0;
const FLOOR_TEXTURE_REPEAT: f32 = 16.0;

/// Floor plane at `FLOOR_Y` covering `±16` on `x` and `z`.
#[rustfmt::skip]
pub fn floor_mesh() -> MeshBuffer {
    let e = FLOOR_HALF_EXTENT;
    let repeat = FLOOR_TEXTURE_REPEAT;
    let vertices = vec![
        -e, FLOOR_Y, -e, 0.0,    0.0,
         e, FLOOR_Y, -e, repeat, 0.0,
        -e, FLOOR_Y,  e, 0.0,    repeat,
         e, FLOOR_Y,  e, repeat, repeat,
    ];
    MeshBuffer::quads(VertexLayout::PositionUv, vertices)
}

/// Full-screen quad in clip space for the sky backdrop.
#[rustfmt::skip]
pub fn skybox_mesh() -> MeshBuffer {
    let vertices = vec![
        -1.0, -1.0, 0.0, 0.0, 1.0,
         1.0, -1.0, 0.0, 1.0, 1.0,
        -1.0,  1.0, 0.0, 0.0, 0.0,
         1.0,  1.0, 0.0, 1.0, 0.0,
    ];
    MeshBuffer::quads(VertexLayout::PositionUv, vertices)
}

/// Billboard quad standing on its origin, one unit tall and wide.
#[rustfmt::skip]
pub fn sprite_mesh() -> MeshBuffer {
    let vertices = vec![
        -0.5, 0.0, 0.0, 0.0, 1.0,
         0.5, 0.0, 0.0, 1.0, 1.0,
        -0.5, 1.0, 0.0, 0.0, 0.0,
         0.5, 1.0, 0.0, 1.0, 0.0,
    ];
    MeshBuffer::quads(VertexLayout::PositionUv, vertices)
}

/// Full-viewport quad in clip space behind the minimap.
#[rustfmt::skip]
pub fn map_backdrop_mesh() -> MeshBuffer {
    let vertices = vec![
        -1.0, -1.0, 0.0,
         1.0, -1.0, 0.0,
        -1.0,  1.0, 0.0,
         1.0,  1.0, 0.0,
    ];
    MeshBuffer::quads(VertexLayout::Position, vertices)
}

/// The player arrow, drawn as a bare triangle without indices.
#[rustfmt::skip]
pub fn map_arrow_mesh() -> MeshBuffer {
    let vertices = vec![
        -1.0, -1.0, 0.0,
         1.0, -1.0, 0.0,
         0.0,  1.0, 0.0,
    ];
    MeshBuffer::new(VertexLayout::Position, vertices, Vec::new())
}

/// Unit square hanging down-right from its origin.
///
/// The mesh carries no instances; attach [`map_square_offsets`] to draw one
/// square per wall cell.
#[rustfmt::skip]
pub fn map_square_mesh() -> MeshBuffer {
    let vertices = vec![
        0.0,  0.0, 0.0,
        1.0,  0.0, 0.0,
        0.0, -1.0, 0.0,
        1.0, -1.0, 0.0,
    ];
    MeshBuffer::quads(VertexLayout::InstancedPosition, vertices)
}

/// `(col, -row)` for every wall cell, so row `0` sits at the top of the map.
pub fn map_square_offsets(grid: &OccupancyGrid) -> Vec<[f32; 2]> {
    grid.occupied()
        .map(|(col, row)| [col as f32, -(row as f32)])
        .collect()
}
