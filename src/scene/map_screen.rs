//! The minimap: wall squares scrolling under a fixed arrow.
//!
//! The map is drawn north-up around the player. The squares move so the
//! player's cell sits at the centre; the arrow stays put and turns with the
//! heading.

use tracing::debug;

use crate::config::Config;
use crate::error::SetupError;
use crate::game::GameState;
use crate::math::Matrix;
use crate::maze::OccupancyGrid;
use crate::mesh::{map_arrow_mesh, map_backdrop_mesh, map_square_mesh, map_square_offsets};
use crate::renderer::draw_unit::{DepthMode, DrawMode, DrawUnitBuilder, DrawUnitId};
use crate::renderer::frame::{DrawCall, DrawUniforms, Pass, Viewport};
use crate::renderer::GraphicsContext;

const FLAT_VERTEX: &str = include_str!("../renderer/shaders/flat.vert.wgsl");
const INSTANCED_VERTEX: &str = include_str!("../renderer/shaders/instanced.vert.wgsl");
const FLAT_FRAGMENT: &str = include_str!("../renderer/shaders/flat.frag.wgsl");

/// Clip-space size of one grid cell.
pub const MAP_SCALE: f32 = 0.05;

const BACKDROP_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const SQUARE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const ARROW_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone)]
pub struct MapScreen {
    backdrop: DrawUnitId,
    squares: DrawUnitId,
    arrow: DrawUnitId,
    grid: OccupancyGrid,
    aspect: f32,
}

impl MapScreen {
    pub fn new(
        ctx: &mut impl GraphicsContext,
        grid: &OccupancyGrid,
        config: &Config,
    ) -> Result<Self, SetupError> {
        let flat_program = ctx.compile("flat", FLAT_VERTEX, FLAT_FRAGMENT)?;
        let instanced_program = ctx.compile("instanced", INSTANCED_VERTEX, FLAT_FRAGMENT)?;

        let backdrop = ctx.create_draw_unit(
            &DrawUnitBuilder::new("map backdrop")
                .mesh(map_backdrop_mesh())
                .program(flat_program)
                .depth(DepthMode::Disabled)
                .build()?,
        )?;

        let offsets = map_square_offsets(grid);
        debug!(squares = offsets.len(), "generated minimap squares");
        let squares = ctx.create_draw_unit(
            &DrawUnitBuilder::new("map squares")
                .draw_mode(DrawMode::InstancedIndexed {
                    instances: offsets.len() as u32,
                })
                .mesh(map_square_mesh().with_instances(offsets))
                .program(instanced_program)
                .depth(DepthMode::Disabled)
                .build()?,
        )?;

        let arrow = ctx.create_draw_unit(
            &DrawUnitBuilder::new("map arrow")
                .mesh(map_arrow_mesh())
                .program(flat_program)
                .draw_mode(DrawMode::Arrays)
                .depth(DepthMode::Disabled)
                .build()?,
        )?;

        Ok(Self {
            backdrop,
            squares,
            arrow,
            grid: grid.clone(),
            aspect: config.aspect,
        })
    }

    /// Composes over the main view without clearing it; the backdrop blanks
    /// the map's own viewport.
    pub fn pass(&self, state: &GameState) -> Pass {
        let player = &state.player;
        let (gx, gy) = self.grid.world_to_grid(player.x(), player.y());

        let flat = |unit, model, color| DrawCall {
            unit,
            uniforms: DrawUniforms {
                model,
                color,
                ..DrawUniforms::default()
            },
        };

        Pass {
            viewport: Viewport::Map,
            clear: None,
            draws: vec![
                flat(self.backdrop, Matrix::identity(), BACKDROP_COLOR),
                flat(
                    self.squares,
                    Matrix::translation(-gx, gy, 0.0).scale(MAP_SCALE, MAP_SCALE * self.aspect, 1.0),
                    SQUARE_COLOR,
                ),
                flat(
                    self.arrow,
                    Matrix::rotation_z(-player.heading()).scale(
                        MAP_SCALE,
                        MAP_SCALE * self.aspect,
                        1.0,
                    ),
                    ARROW_COLOR,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::keys::{KeyState, LogicalButton};
    use crate::renderer::recording::RecordingContext;

    fn setup(grid: &OccupancyGrid) -> (RecordingContext, MapScreen) {
        let mut ctx = RecordingContext::new();
        let screen = MapScreen::new(&mut ctx, grid, &Config::default()).unwrap();
        (ctx, screen)
    }

    #[test]
    fn one_instance_per_wall_cell() {
        let grid = OccupancyGrid::default_maze();
        let (ctx, _) = setup(&grid);
        let (_, squares) = ctx.unit_named("map squares").unwrap();
        let walls = grid.occupied().count();
        assert_eq!(squares.mesh().instances().len(), walls);
        assert_eq!(
            squares.draw_mode(),
            DrawMode::InstancedIndexed {
                instances: walls as u32
            }
        );
    }

    #[test]
    fn every_map_unit_skips_depth() {
        let (ctx, _) = setup(&OccupancyGrid::default_maze());
        assert_eq!(ctx.units.len(), 3);
        assert!(ctx.units.iter().all(|u| u.depth_mode() == DepthMode::Disabled));
        assert_eq!(ctx.programs.len(), 2);
    }

    #[test]
    fn pass_keeps_main_view_and_draws_arrow_last() {
        let (ctx, screen) = setup(&OccupancyGrid::default_maze());
        let pass = screen.pass(&GameState::new());
        assert_eq!(pass.viewport, Viewport::Map);
        assert_eq!(pass.clear, None);
        let order: Vec<_> = pass.draws.iter().map(|d| ctx.unit(d.unit).label()).collect();
        assert_eq!(order, ["map backdrop", "map squares", "map arrow"]);
        assert_eq!(pass.draws[2].uniforms.color, ARROW_COLOR);
    }

    #[test]
    fn player_cell_lands_at_the_map_centre() {
        let grid = OccupancyGrid::default_maze();
        let (_, screen) = setup(&grid);
        let mut state = GameState::new();
        let mut keys = KeyState::new();
        keys.press(LogicalButton::Forward);
        keys.press(LogicalButton::TurnRight);
        for _ in 0..30 {
            state.update(&keys);
        }

        let (gx, gy) = grid.world_to_grid(state.player.x(), state.player.y());
        let model = screen.pass(&state).draws[1].uniforms.model;
        let centre = model.transform_point([gx, -gy, 0.0]);
        assert!(centre[0].abs() < 1e-5 && centre[1].abs() < 1e-5);
    }

    #[test]
    fn squares_keep_their_shape_on_wide_screens() {
        let (_, screen) = setup(&OccupancyGrid::default_maze());
        let model = screen.pass(&GameState::new()).draws[1].uniforms.model;
        let origin = model.transform_point([0.0, 0.0, 0.0]);
        let corner = model.transform_point([1.0, -1.0, 0.0]);
        assert!((corner[0] - origin[0] - MAP_SCALE).abs() < 1e-6);
        assert!((origin[1] - corner[1] - MAP_SCALE * 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn arrow_turns_against_the_heading() {
        let (_, screen) = setup(&OccupancyGrid::default_maze());
        let mut state = GameState::new();
        let mut keys = KeyState::new();
        keys.press(LogicalButton::TurnLeft);
        for _ in 0..20 {
            state.update(&keys);
        }

        let model = screen.pass(&state).draws[2].uniforms.model;
        let expected = Matrix::rotation_z(-state.player.heading()).scale(
            MAP_SCALE,
            MAP_SCALE * 16.0 / 9.0,
            1.0,
        );
        assert!(model.approx_eq(&expected, 1e-6));
        let tip = model.transform_point([0.0, 1.0, 0.0]);
        assert!(tip[0] < 0.0, "turning left should swing the tip left");
    }

    #[test]
    fn open_grid_draws_no_squares() {
        let grid = OccupancyGrid::new(2, 2, vec![0; 4]).unwrap();
        let (ctx, _) = setup(&grid);
        let (_, squares) = ctx.unit_named("map squares").unwrap();
        assert!(squares.mesh().instances().is_empty());
        assert_eq!(squares.draw_mode(), DrawMode::InstancedIndexed { instances: 0 });
    }
}
