//! Keyboard input handling.
//!
//! This module defines the [`LogicalButton`] enum that decouples the walker's
//! controls from physical keys, and [`KeyState`] for tracking which buttons are
//! currently held. The winit key mapping is the only place raw keys appear.

use std::collections::HashSet;
use winit::keyboard;

/// Every action the walker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    /// Walk forward (Up Arrow).
    Forward,
    /// Walk backward (Down Arrow).
    Backward,
    /// Turn left (Left Arrow).
    TurnLeft,
    /// Turn right (Right Arrow).
    TurnRight,
    /// Jump (Z).
    Jump,
    /// Slide the camera left (A).
    CameraLeft,
    /// Slide the camera right (D).
    CameraRight,
    /// Slide the camera forward (W).
    CameraForward,
    /// Slide the camera back (S).
    CameraBack,
    /// Raise the camera (R).
    CameraUp,
    /// Lower the camera (F).
    CameraDown,
    /// Pitch up (K).
    PitchUp,
    /// Pitch down (H).
    PitchDown,
    /// Yaw left (T).
    YawLeft,
    /// Yaw right (G).
    YawRight,
    /// Roll left (J).
    RollLeft,
    /// Roll right (U).
    RollRight,
    /// Close the window (Escape or Q).
    Quit,
}

/// Tracks the set of currently held buttons.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pressed: HashSet<LogicalButton>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: LogicalButton) {
        self.pressed.insert(button);
    }

    pub fn release(&mut self, button: LogicalButton) {
        self.pressed.remove(&button);
    }

    pub fn is_pressed(&self, button: LogicalButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Releases everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Maps a winit logical key to the button it drives, if any.
pub fn winit_key_to_button(key: &keyboard::Key) -> Option<LogicalButton> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => LogicalButton::Forward,
            ArrowDown => LogicalButton::Backward,
            ArrowLeft => LogicalButton::TurnLeft,
            ArrowRight => LogicalButton::TurnRight,
            Escape => LogicalButton::Quit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "z" => LogicalButton::Jump,
            "w" => LogicalButton::CameraForward,
            "a" => LogicalButton::CameraLeft,
            "s" => LogicalButton::CameraBack,
            "d" => LogicalButton::CameraRight,
            "r" => LogicalButton::CameraUp,
            "f" => LogicalButton::CameraDown,
            "k" => LogicalButton::PitchUp,
            "h" => LogicalButton::PitchDown,
            "t" => LogicalButton::YawLeft,
            "g" => LogicalButton::YawRight,
            "j" => LogicalButton::RollLeft,
            "u" => LogicalButton::RollRight,
            "q" => LogicalButton::Quit,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey, SmolStr};

    #[test]
    fn press_and_release_track_buttons() {
        let mut keys = KeyState::new();
        keys.press(LogicalButton::Forward);
        keys.press(LogicalButton::Jump);
        assert!(keys.is_pressed(LogicalButton::Forward));
        keys.release(LogicalButton::Forward);
        assert!(!keys.is_pressed(LogicalButton::Forward));
        assert!(keys.is_pressed(LogicalButton::Jump));
        keys.clear();
        assert!(!keys.is_pressed(LogicalButton::Jump));
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut keys = KeyState::new();
        keys.press(LogicalButton::TurnLeft);
        keys.press(LogicalButton::TurnLeft);
        keys.release(LogicalButton::TurnLeft);
        assert!(!keys.is_pressed(LogicalButton::TurnLeft));
    }

    #[test]
    fn arrows_walk_and_turn() {
        assert_eq!(
            winit_key_to_button(&Key::Named(NamedKey::ArrowUp)),
            Some(LogicalButton::Forward)
        );
        assert_eq!(
            winit_key_to_button(&Key::Named(NamedKey::ArrowLeft)),
            Some(LogicalButton::TurnLeft)
        );
        assert_eq!(
            winit_key_to_button(&Key::Named(NamedKey::Escape)),
            Some(LogicalButton::Quit)
        );
    }

    #[test]
    fn letters_map_case_insensitively() {
        let upper = Key::Character(SmolStr::new("Z"));
        let lower = Key::Character(SmolStr::new("k"));
        assert_eq!(winit_key_to_button(&upper), Some(LogicalButton::Jump));
        assert_eq!(winit_key_to_button(&lower), Some(LogicalButton::PitchUp));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(winit_key_to_button(&Key::Character(SmolStr::new("x"))), None);
        assert_eq!(winit_key_to_button(&Key::Named(NamedKey::Space)), None);
    }
}
