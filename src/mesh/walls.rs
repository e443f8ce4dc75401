//! Wall and block extrusion.
//!
//! A wall cell spans `CELL_SIZE` in `x` and `z` and `WALL_HEIGHT` upward from
//! `FLOOR_Y`. Faces are named after the side of the cell they close off:
//! north is the `-z` side (toward row `0`), west the `-x` side.

use super::{MeshBuffer, VertexLayout, CELL_SIZE, FLOOR_Y, WALL_HEIGHT};
use crate::maze::OccupancyGrid;

/// Floats in one textured face: four vertices of `x, y, z, u, v`.
pub type Face = [f32; 20];

/// World-space minimum corner of a cell on the `x`/`z` plane.
fn cell_origin(grid: &OccupancyGrid, col: usize, row: usize) -> (f32, f32) {
    let x = (col as f32 - (grid.width() / 2) as f32) * CELL_SIZE;
    let z = (row as f32 - (grid.height() / 2) as f32) * CELL_SIZE;
    (x, z)
}

#[rustfmt::skip]
pub fn north_face(x: f32, w: f32, y: f32, h: f32, z: f32, _d: f32) -> Face {
    [
        x,     y,     z, 0.0, 1.0,
        x + w, y,     z, 1.0, 1.0,
        x,     y + h, z, 0.0, 0.0,
        x + w, y + h, z, 1.0, 0.0,
    ]
}

#[rustfmt::skip]
pub fn east_face(x: f32, w: f32, y: f32, h: f32, z: f32, d: f32) -> Face {
    [
        x + w, y,     z,     0.0, 1.0,
        x + w, y,     z + d, 1.0, 1.0,
        x + w, y + h, z,     0.0, 0.0,
        x + w, y + h, z + d, 1.0, 0.0,
    ]
}

#[rustfmt::skip]
pub fn south_face(x: f32, w: f32, y: f32, h: f32, z: f32, d: f32) -> Face {
    [
        x + w, y,     z + d, 0.0, 1.0,
        x,     y,     z + d, 1.0, 1.0,
        x + w, y + h, z + d, 0.0, 0.0,
        x,     y + h, z + d, 1.0, 0.0,
    ]
}

#[rustfmt::skip]
pub fn west_face(x: f32, _w: f32, y: f32, h: f32, z: f32, d: f32) -> Face {
    [
        x, y,     z,     0.0, 1.0,
        x, y,     z + d, 1.0, 1.0,
        x, y + h, z,     0.0, 0.0,
        x, y + h, z + d, 1.0, 0.0,
    ]
}

/// Positions of all six faces of a box, four vertices per face.
///
/// Face order is north, east, south, west, bottom, top.
#[rustfmt::skip]
pub fn cube_positions(x: f32, w: f32, y: f32, h: f32, z: f32, d: f32) -> [f32; 72] {
    [
        x,     y,     z,
        x + w, y,     z,
        x,     y + h, z,
        x + w, y + h, z,

        x + w, y,     z,
        x + w, y,     z + d,
        x + w, y + h, z,
        x + w, y + h, z + d,

        x + w, y,     z + d,
        x,     y,     z + d,
        x + w, y + h, z + d,
        x,     y + h, z + d,

        x,     y,     z,
        x,     y,     z + d,
        x,     y + h, z,
        x,     y + h, z + d,

        x,     y,     z,
        x,     y,     z + d,
        x + w, y,     z,
        x + w, y,     z + d,

        x,     y + h, z,
        x,     y + h, z + d,
        x + w, y + h, z,
        x + w, y + h, z + d,
    ]
}

/// A closed box for every wall cell, positions only.
pub fn block_mesh(grid: &OccupancyGrid) -> MeshBuffer {
    let mut vertices = Vec::new();
    for (col, row) in grid.occupied() {
        let (x, z) = cell_origin(grid, col, row);
        vertices.extend_from_slice(&cube_positions(
            x,
            CELL_SIZE,
            FLOOR_Y,
            WALL_HEIGHT,
            z,
            CELL_SIZE,
        ));
    }
    MeshBuffer::quads(VertexLayout::Position, vertices)
}

/// Textured wall faces with hidden faces removed.
///
/// A face is emitted only where the neighbouring cell is open or the cell
/// sits on the grid boundary, so two adjacent walls never produce the faces
/// between them.
pub fn wall_mesh(grid: &OccupancyGrid) -> MeshBuffer {
    let mut vertices = Vec::new();
    let (width, height) = (grid.width(), grid.height());

    for (col, row) in grid.occupied() {
        let (x, z) = cell_origin(grid, col, row);
        let mut push = |build: fn(f32, f32, f32, f32, f32, f32) -> Face| {
            vertices.extend_from_slice(&build(x, CELL_SIZE, FLOOR_Y, WALL_HEIGHT, z, CELL_SIZE));
        };

        if row == 0 || !grid.is_wall(col, row - 1) {
            push(north_face);
        }
        if row == height - 1 || !grid.is_wall(col, row + 1) {
            push(south_face);
        }
        if col == 0 || !grid.is_wall(col - 1, row) {
            push(west_face);
        }
        if col == width - 1 || !grid.is_wall(col + 1, row) {
            push(east_face);
        }
    }

    MeshBuffer::quads(VertexLayout::PositionUv, vertices)
}
