//! The first-person view: sky, walls, floor and the player's sprite.

use tracing::debug;

use crate::config::Config;
use crate::error::SetupError;
use crate::game::GameState;
use crate::math::{Matrix, deg_to_rad, wrap_turns};
use crate::maze::OccupancyGrid;
use crate::mesh::{FLOOR_Y, floor_mesh, skybox_mesh, sprite_mesh, wall_mesh};
use crate::renderer::draw_unit::{Blend, DepthMode, DrawUnitBuilder, DrawUnitId, WrapMode};
use crate::renderer::frame::{DrawCall, DrawUniforms, Pass, Viewport};
use crate::renderer::texture::{Pattern, TextureSource};
use crate::renderer::GraphicsContext;

const SCENE_VERTEX: &str = include_str!("../renderer/shaders/scene.vert.wgsl");
const SCENE_FRAGMENT: &str = include_str!("../renderer/shaders/scene.frag.wgsl");
const SKY_VERTEX: &str = include_str!("../renderer/shaders/sky.vert.wgsl");
const SKY_FRAGMENT: &str = include_str!("../renderer/shaders/sky.frag.wgsl");
const SPRITE_VERTEX: &str = include_str!("../renderer/shaders/sprite.vert.wgsl");
const SPRITE_FRAGMENT: &str = include_str!("../renderer/shaders/sprite.frag.wgsl");

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone)]
pub struct MainScreen {
    sky: DrawUnitId,
    walls: DrawUnitId,
    floor: DrawUnitId,
    sprite: DrawUnitId,
    projection: Matrix,
}

impl MainScreen {
    pub fn new(
        ctx: &mut impl GraphicsContext,
        grid: &OccupancyGrid,
        config: &Config,
    ) -> Result<Self, SetupError> {
        let scene_program = ctx.compile("scene", SCENE_VERTEX, SCENE_FRAGMENT)?;
        let sky_program = ctx.compile("sky", SKY_VERTEX, SKY_FRAGMENT)?;
        let sprite_program = ctx.compile("sprite", SPRITE_VERTEX, SPRITE_FRAGMENT)?;

        let sky = ctx.create_draw_unit(
            &DrawUnitBuilder::new("sky")
                .mesh(skybox_mesh())
                .program(sky_program)
                .texture(
                    TextureSource::file_or(config.sky_texture.clone(), Pattern::Sky),
                    WrapMode::Repeat,
                )
                .depth(DepthMode::Background)
                .build()?,
        )?;

        let walls_mesh = wall_mesh(grid);
        debug!(
            vertices = walls_mesh.vertex_count(),
            triangles = walls_mesh.triangle_count(),
            "generated wall mesh"
        );
        let walls = ctx.create_draw_unit(
            &DrawUnitBuilder::new("walls")
                .mesh(walls_mesh)
                .program(scene_program)
                .texture(
                    TextureSource::file_or(config.wall_texture.clone(), Pattern::Brick),
                    WrapMode::Clamp,
                )
                .build()?,
        )?;

        let floor = ctx.create_draw_unit(
            &DrawUnitBuilder::new("floor")
                .mesh(floor_mesh())
                .program(scene_program)
                .texture(
                    TextureSource::file_or(config.floor_texture.clone(), Pattern::Rocks),
                    WrapMode::Repeat,
                )
                .build()?,
        )?;

        let sprite = ctx.create_draw_unit(
            &DrawUnitBuilder::new("sprite")
                .mesh(sprite_mesh())
                .program(sprite_program)
                .texture(
                    TextureSource::file_or(config.sprite_texture.clone(), Pattern::Sprite),
                    WrapMode::Clamp,
                )
                .blend(Blend::Alpha)
                .build()?,
        )?;

        Ok(Self {
            sky,
            walls,
            floor,
            sprite,
            projection: Matrix::projection(
                deg_to_rad(config.fov),
                config.aspect,
                config.near,
                config.far,
            ),
        })
    }

    pub fn projection(&self) -> Matrix {
        self.projection
    }

    /// Draws the sky behind everything, then the maze and the sprite with
    /// the player's view.
    pub fn pass(&self, state: &GameState) -> Pass {
        let player = &state.player;
        let perspective = DrawUniforms {
            view: state.view_matrix(),
            projection: self.projection,
            ..DrawUniforms::default()
        };

        let sky = DrawCall {
            unit: self.sky,
            uniforms: DrawUniforms {
                uv_offset: [wrap_turns(player.heading()), 0.0],
                ..DrawUniforms::default()
            },
        };
        let sprite = DrawCall {
            unit: self.sprite,
            uniforms: DrawUniforms {
                model: Matrix::translation(player.x(), FLOOR_Y + player.height(), -player.y()),
                ..perspective
            },
        };

        Pass {
            viewport: Viewport::Main,
            clear: Some(CLEAR_COLOR),
            draws: vec![
                sky,
                DrawCall {
                    unit: self.walls,
                    uniforms: perspective,
                },
                DrawCall {
                    unit: self.floor,
                    uniforms: perspective,
                },
                sprite,
            ],
        }
    }
}
