//! Player state and movement logic.
//!
//! The player walks on the ground plane and turns with a heading angle.
//!
//! # Coordinate System
//!
//! - `x`: east/west on the ground plane, equal to world `x`
//! - `y`: north, equal to world `-z`
//! - `height`: jump height above the floor, added to world `y`
//!
//! The heading is in radians. A heading of `0` walks toward `+y`, and turning
//! left increases it.

use std::f32::consts::FRAC_PI_2;

use super::keys::{KeyState, LogicalButton};
use crate::motion::{Movement, Velocity};

/// Top speed of the jump velocity.
const MAX_JUMP: f32 = 0.15;
/// Jump speed below which the player starts being pulled back down.
const FALL_THRESHOLD: f32 = 0.05;

/// Stage of the jump state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Ground,
    Jumping,
    Falling,
}

#[derive(Debug, Clone)]
pub struct Player {
    x: f32,
    y: f32,
    height: f32,
    heading: Movement,
    speed: Velocity,
    jump: Velocity,
    phase: JumpPhase,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A player standing at the origin facing north.
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            height: 0.0,
            heading: Movement::new(0.005, 0.05, 0.9, 0.0),
            speed: Velocity::new(0.01, 0.1, 0.9),
            jump: Velocity::new(0.1, MAX_JUMP, 0.9),
            phase: JumpPhase::Ground,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn heading(&self) -> f32 {
        self.heading.value()
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// Position of the player's feet in world space.
    pub fn world_position(&self) -> [f32; 3] {
        [self.x, self.height, -self.y]
    }

    /// Advances turning, walking and jumping by one tick.
    pub fn update(&mut self, keys: &KeyState) {
        self.heading.update(
            keys.is_pressed(LogicalButton::TurnLeft),
            keys.is_pressed(LogicalButton::TurnRight),
        );

        self.speed.update(
            keys.is_pressed(LogicalButton::Forward),
            keys.is_pressed(LogicalButton::Backward),
        );
        let direction = self.heading.value() + FRAC_PI_2;
        self.x += direction.cos() * self.speed.value();
        self.y += direction.sin() * self.speed.value();

        self.update_jump(keys.is_pressed(LogicalButton::Jump));
    }

    fn update_jump(&mut self, jump_pressed: bool) {
        if jump_pressed && self.phase == JumpPhase::Ground {
            self.phase = JumpPhase::Jumping;
        }

        if self.phase == JumpPhase::Jumping {
            let still_jumping = jump_pressed && self.jump.value() < MAX_JUMP;
            self.jump.update(still_jumping, false);
            self.height += self.jump.value();
            if !still_jumping {
                self.phase = JumpPhase::Falling;
            }
        }

        // Falling runs in the same tick the jump ends.
        if self.phase == JumpPhase::Falling {
            let pull_down = self.jump.value() < FALL_THRESHOLD;
            self.jump.update(false, pull_down);
            self.height += self.jump.value();
            if self.height < 0.0 {
                self.height = 0.0;
                self.phase = JumpPhase::Ground;
                self.jump.set_value(0.0);
            }
        }
    }
}
