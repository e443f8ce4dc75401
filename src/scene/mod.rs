//! Scene renderers.
//!
//! A [`Scene`] owns the draw units of both screens and turns a [`GameState`]
//! into a [`Frame`]: the first-person [`MainScreen`] pass followed by the
//! [`MapScreen`] overlay.

pub mod main_screen;
pub mod map_screen;

pub use main_screen::MainScreen;
pub use map_screen::MapScreen;
pub use crate::renderer::frame::ScreenLayout;

use tracing::info;

use crate::config::Config;
use crate::error::SetupError;
use crate::game::GameState;
use crate::maze::OccupancyGrid;
use crate::renderer::GraphicsContext;
use crate::renderer::frame::Frame;

#[derive(Debug, Clone)]
pub struct Scene {
    main: MainScreen,
    map: MapScreen,
    layout: ScreenLayout,
    aspect: f32,
}

impl Scene {
    /// Creates every draw unit and sizes the viewports for the configured
    /// window.
    pub fn new(
        ctx: &mut impl GraphicsContext,
        grid: &OccupancyGrid,
        config: &Config,
    ) -> Result<Self, SetupError> {
        let main = MainScreen::new(ctx, grid, config)?;
        let map = MapScreen::new(ctx, grid, config)?;
        info!(
            width = grid.width(),
            height = grid.height(),
            walls = grid.occupied().count(),
            "scene ready"
        );

        Ok(Self {
            main,
            map,
            layout: ScreenLayout::fit(config.width, config.height, config.aspect),
            aspect: config.aspect,
        })
    }

    /// Refits the viewports to a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layout = ScreenLayout::fit(width, height, self.aspect);
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn frame(&self, state: &GameState) -> Frame {
        Frame {
            layout: self.layout,
            passes: vec![self.main.pass(state), self.map.pass(state)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, ShaderStage};
    use crate::renderer::frame::Viewport;
    use crate::renderer::recording::RecordingContext;

    #[test]
    fn frame_draws_main_view_then_map() {
        let mut ctx = RecordingContext::new();
        let scene = Scene::new(&mut ctx, &OccupancyGrid::default_maze(), &Config::default()).unwrap();
        let frame = scene.frame(&GameState::new());

        let viewports: Vec<_> = frame.passes.iter().map(|p| p.viewport).collect();
        assert_eq!(viewports, [Viewport::Main, Viewport::Map]);
        assert_eq!(ctx.units.len(), 7);
        assert_eq!(ctx.programs.len(), 5);
    }

    #[test]
    fn frames_pass_backend_validation() {
        let mut ctx = RecordingContext::new();
        let scene = Scene::new(&mut ctx, &OccupancyGrid::default_maze(), &Config::default()).unwrap();
        ctx.submit(&scene.frame(&GameState::new())).unwrap();
        assert_eq!(ctx.frames.len(), 1);
    }

    #[test]
    fn layout_follows_window_size() {
        let mut ctx = RecordingContext::new();
        let mut scene =
            Scene::new(&mut ctx, &OccupancyGrid::default_maze(), &Config::default()).unwrap();
        assert_eq!(scene.layout(), ScreenLayout::fit(1360, 768, 16.0 / 9.0));

        scene.resize(1600, 900);
        let frame = scene.frame(&GameState::new());
        assert_eq!(frame.layout.main.width, 1600.0);
        assert_eq!(frame.layout.map.height, 900.0 / 8.0);

        scene.resize(0, 0);
        assert!(scene.layout().is_empty());
    }

    #[test]
    fn shader_failures_abort_setup() {
        let mut ctx = RecordingContext::new();
        ctx.fail_compile = Some("instanced".to_string());
        let err = Scene::new(&mut ctx, &OccupancyGrid::default_maze(), &Config::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SetupError::ShaderCompile { ref label, stage: ShaderStage::Vertex, .. } if label == "instanced"
        ));
    }

    #[test]
    fn frames_from_another_scene_are_rejected() {
        let mut small = RecordingContext::new();
        let mut ctx = RecordingContext::new();
        let scene = Scene::new(&mut ctx, &OccupancyGrid::default_maze(), &Config::default()).unwrap();
        let err = small.submit(&scene.frame(&GameState::new())).unwrap_err();
        assert!(matches!(err, RenderError::UnknownUnit(_)));
    }
}
