//! mazewalk - a first-person walk through a grid maze.
//!
//! The maze is an [`OccupancyGrid`](maze::OccupancyGrid) of wall and open cells. Walls are
//! extruded into textured quads, drawn in perspective from the player's eye over a tiled floor
//! and a scrolling sky, with a minimap in the corner.
//!
//! # Architecture
//! - `math/`: 4x4 transforms and angle helpers
//! - `motion/`: per-tick velocity and movement integrators
//! - `maze/` and `mesh/`: the grid and the geometry generated from it
//! - `game/`: key state, player, camera
//! - `renderer/`: draw units, frames and the wgpu backend
//! - `scene/`: the main view and minimap expressed as draw units
//! - `app/`: winit event handling and the frame loop

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod mesh;
pub mod motion;
pub mod renderer;
pub mod scene;
