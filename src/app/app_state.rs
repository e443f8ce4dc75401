//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! session: the wgpu renderer, the scene built on it, the simulation and the held keys.

use tracing::info;

use crate::app::tick;
use crate::config::Config;
use crate::error::{RenderError, SetupError};
use crate::game::GameState;
use crate::game::keys::KeyState;
use crate::maze::OccupancyGrid;
use crate::renderer::GraphicsContext;
use crate::renderer::wgpu_lib::WgpuRenderer;
use crate::scene::Scene;

/// Holds all state required for a running session.
pub struct AppState {
    /// The WGPU renderer owning every GPU resource.
    pub renderer: WgpuRenderer,
    /// Draw units and viewport layout for both screens.
    pub scene: Scene,
    /// Player and camera.
    pub game_state: GameState,
    /// The current input state (pressed keys, etc.).
    pub key_state: KeyState,
}

impl AppState {
    /// Builds the scene on `renderer` and sizes everything for the window.
    ///
    /// # Arguments
    /// - `renderer`: An initialised renderer.
    /// - `config`: Projection, aspect and texture options.
    /// - `width`: Initial window width.
    /// - `height`: Initial window height.
    pub fn new(
        mut renderer: WgpuRenderer,
        config: &Config,
        width: u32,
        height: u32,
    ) -> Result<Self, SetupError> {
        let grid = OccupancyGrid::default_maze();
        let scene = Scene::new(&mut renderer, &grid, config)?;

        let mut state = Self {
            renderer,
            scene,
            game_state: GameState::new(),
            key_state: KeyState::new(),
        };
        state.resize(width, height);
        info!(width, height, "application state initialised");
        Ok(state)
    }

    /// Resizes the render targets and refits the viewports.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.scene.resize(width, height);
    }

    /// Runs one tick and renders it.
    pub fn redraw(&mut self) -> Result<(), RenderError> {
        let frame = tick(&mut self.game_state, &self.scene, &self.key_state);
        self.renderer.submit(&frame)
    }
}
