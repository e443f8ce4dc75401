//! Game state management module.
//!
//! This module defines [`GameState`], which holds everything the simulation
//! changes from tick to tick: the walking, jumping [`Player`] and the
//! free-look [`Camera`] layered on top of the player's eye.
//!
//! One call to [`GameState::update`] is one simulation tick. There is no
//! delta time; every speed is expressed in units per tick.

pub mod camera;
pub mod keys;
pub mod player;

use self::camera::Camera;
use self::keys::KeyState;
use self::player::Player;
use crate::math::Matrix;

#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub player: Player,
    pub camera: Camera,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one tick of input through the player and camera integrators.
    pub fn update(&mut self, keys: &KeyState) {
        self.player.update(keys);
        self.camera.update(keys);
    }

    /// World-to-eye transform for the main screen.
    ///
    /// Moves the world so the player sits at the origin, turns it by the
    /// heading, then applies the camera's own offset and rotation.
    pub fn view_matrix(&self) -> Matrix {
        let player = &self.player;
        let [cx, cy, cz] = self.camera.position();
        let [rx, ry, rz] = self.camera.rotation();
        Matrix::identity()
            .translate(-player.x(), -player.height(), player.y())
            .rotate_y(player.heading())
            .translate(-cx, -cy, -cz)
            .rotate_y(ry)
            .rotate_x(rx)
            .rotate_z(rz)
    }
}
