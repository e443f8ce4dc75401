//! Occupancy grid module.
//!
//! The walker's level is a flat, row-major grid of `0`/`1` cells: `1` is a
//! solid wall block, `0` is open floor. This module owns the validated grid
//! type, the built-in 16x16 layout and the mapping from player ground
//! coordinates to fractional grid coordinates used by the minimap.
//!
//! # Layout
//! - Row `0` is the northern edge of the level, column `0` the western edge.
//! - Each cell is [`CELL_SIZE`](crate::mesh::CELL_SIZE) world units wide, and
//!   the grid is centred on the world origin using integer halves of its size.

pub mod grid;

pub use grid::{GridError, OccupancyGrid};

/// Width (and height) of the built-in maze.
pub const GRID_WIDTH: usize = 16;

#[rustfmt::skip]
const DEFAULT_CELLS: [u8; GRID_WIDTH * GRID_WIDTH] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1,
    1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

impl OccupancyGrid {
    /// The built-in 16x16 maze.
    pub fn default_maze() -> Self {
        Self::from_trusted(GRID_WIDTH, GRID_WIDTH, DEFAULT_CELLS.to_vec())
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::default_maze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maze_is_sixteen_square() {
        let grid = OccupancyGrid::default_maze();
        assert_eq!(grid.width(), GRID_WIDTH);
        assert_eq!(grid.height(), GRID_WIDTH);
        assert_eq!(grid.cells().len(), GRID_WIDTH * GRID_WIDTH);
    }

    #[test]
    fn default_maze_is_walled_in() {
        let grid = OccupancyGrid::default_maze();
        for i in 0..GRID_WIDTH {
            assert!(grid.is_wall(i, 0));
            assert!(grid.is_wall(i, GRID_WIDTH - 1));
            assert!(grid.is_wall(0, i));
            assert!(grid.is_wall(GRID_WIDTH - 1, i));
        }
    }

    #[test]
    fn default_maze_passes_validation() {
        let grid = OccupancyGrid::default_maze();
        let rebuilt = OccupancyGrid::new(grid.width(), grid.height(), grid.cells().to_vec());
        assert_eq!(rebuilt, Ok(grid));
    }

    #[test]
    fn origin_is_open_floor() {
        let grid = OccupancyGrid::default_maze();
        let (gx, gy) = grid.world_to_grid(0.0, 0.0);
        assert!(!grid.is_wall(gx as usize, gy as usize));
    }
}
