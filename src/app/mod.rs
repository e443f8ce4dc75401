//! Application module.
//!
//! This module contains the window lifecycle and the frame loop. It wires winit events into
//! [`KeyState`], advances the simulation once per redraw and hands the resulting [`Frame`] to
//! the renderer.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds the renderer, scene and game state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Contains the redraw handler
//!
//! # Threading Model
//!
//! Everything runs on the event loop thread. Key events only flip entries in [`KeyState`];
//! the redraw handler reads them through [`tick`].

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;

use crate::game::GameState;
use crate::game::keys::KeyState;
use crate::renderer::frame::Frame;
use crate::scene::Scene;

/// Advances the simulation by one tick and describes the resulting frame.
pub fn tick(game: &mut GameState, scene: &Scene, keys: &KeyState) -> Frame {
    game.update(keys);
    scene.frame(game)
}
