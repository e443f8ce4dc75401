//! Free-look camera offset.
//!
//! The camera is an extra transform stacked on top of the player's view. Each
//! of its three position axes and three rotation axes has its own
//! [`Velocity`], so every key glides in and coasts out the same way the player
//! walks.

use super::keys::{KeyState, LogicalButton};
use crate::motion::Velocity;

const START_SPEED: f32 = 0.01;
const MAX_SPEED: f32 = 0.1;
const TRACTION: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct Camera {
    position: [f32; 3],
    rotation: [f32; 3],
    position_velocity: [Velocity; 3],
    rotation_velocity: [Velocity; 3],
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        let axis = || Velocity::new(START_SPEED, MAX_SPEED, TRACTION);
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            position_velocity: [axis(), axis(), axis()],
            rotation_velocity: [axis(), axis(), axis()],
        }
    }

    /// Offset `[x, y, z]` from the player's eye.
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Rotation `[x, y, z]` in radians.
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation
    }

    pub fn update(&mut self, keys: &KeyState) {
        let held = |button| keys.is_pressed(button);

        let position_inputs = [
            (LogicalButton::CameraRight, LogicalButton::CameraLeft),
            (LogicalButton::CameraUp, LogicalButton::CameraDown),
            (LogicalButton::CameraBack, LogicalButton::CameraForward),
        ];
        let rotation_inputs = [
            (LogicalButton::PitchUp, LogicalButton::PitchDown),
            (LogicalButton::YawLeft, LogicalButton::YawRight),
            (LogicalButton::RollLeft, LogicalButton::RollRight),
        ];

        for (axis, (forward, backward)) in position_inputs.into_iter().enumerate() {
            self.position_velocity[axis].update(held(forward), held(backward));
            self.position[axis] += self.position_velocity[axis].value();
        }
        for (axis, (forward, backward)) in rotation_inputs.into_iter().enumerate() {
            self.rotation_velocity[axis].update(held(forward), held(backward));
            self.rotation[axis] += self.rotation_velocity[axis].value();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centred() {
        let camera = Camera::new();
        assert_eq!(camera.position(), [0.0; 3]);
        assert_eq!(camera.rotation(), [0.0; 3]);
    }

    #[test]
    fn each_button_drives_its_own_axis() {
        let cases = [
            (LogicalButton::CameraRight, 0, 1.0, true),
            (LogicalButton::CameraLeft, 0, -1.0, true),
            (LogicalButton::CameraUp, 1, 1.0, true),
            (LogicalButton::CameraDown, 1, -1.0, true),
            (LogicalButton::CameraBack, 2, 1.0, true),
            (LogicalButton::CameraForward, 2, -1.0, true),
            (LogicalButton::PitchUp, 0, 1.0, false),
            (LogicalButton::PitchDown, 0, -1.0, false),
            (LogicalButton::YawLeft, 1, 1.0, false),
            (LogicalButton::YawRight, 1, -1.0, false),
            (LogicalButton::RollLeft, 2, 1.0, false),
            (LogicalButton::RollRight, 2, -1.0, false),
        ];

        for (button, axis, sign, is_position) in cases {
            let mut camera = Camera::new();
            let mut keys = KeyState::new();
            keys.press(button);
            camera.update(&keys);

            let (moved, still) = if is_position {
                (camera.position(), camera.rotation())
            } else {
                (camera.rotation(), camera.position())
            };
            assert_eq!(moved[axis], sign * START_SPEED, "{button:?}");
            assert_eq!(still, [0.0; 3], "{button:?}");
            for other in (0..3).filter(|a| *a != axis) {
                assert_eq!(moved[other], 0.0, "{button:?}");
            }
        }
    }

    #[test]
    fn coasts_after_release() {
        let mut camera = Camera::new();
        let mut keys = KeyState::new();
        keys.press(LogicalButton::YawLeft);
        camera.update(&keys);
        keys.clear();
        camera.update(&keys);
        let coasted = camera.rotation()[1];
        assert!(coasted > START_SPEED);
        assert!(coasted < 2.0 * START_SPEED);
    }
}
