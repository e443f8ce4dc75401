//! Accumulating wrapper around [`Velocity`].

use super::velocity::Velocity;

/// A value that integrates its own [`Velocity`] every tick.
///
/// The accumulated value is never clamped or wrapped. Consumers that need a
/// bounded quantity, such as a texture scroll derived from a heading, wrap it
/// themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    velocity: Velocity,
    value: f32,
}

impl Movement {
    pub fn new(start_speed: f32, max_speed: f32, traction: f32, value: f32) -> Self {
        Self {
            velocity: Velocity::new(start_speed, max_speed, traction),
            value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    /// Updates the velocity from the inputs, then adds it to the value.
    pub fn update(&mut self, forward: bool, backward: bool) {
        self.velocity.update(forward, backward);
        self.value += self.velocity.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_velocity_each_tick() {
        let mut m = Movement::new(0.005, 0.05, 0.9, 0.0);
        m.update(true, false);
        m.update(true, false);
        m.update(true, false);
        assert!((m.value() - (0.005 + 0.010 + 0.015)).abs() < 1e-6);
        assert!((m.velocity().value() - 0.015).abs() < 1e-7);
    }

    #[test]
    fn starts_from_initial_value() {
        let mut m = Movement::new(0.1, 1.0, 1.0, 2.5);
        assert_eq!(m.value(), 2.5);
        m.update(false, false);
        assert_eq!(m.value(), 2.5);
    }

    #[test]
    fn value_grows_without_bound() {
        let mut m = Movement::new(0.1, 0.1, 1.0, 0.0);
        for _ in 0..1000 {
            m.update(true, false);
        }
        assert!(m.value() > 99.0);
    }

    #[test]
    fn coasts_after_release() {
        let mut m = Movement::new(0.01, 0.1, 0.5, 0.0);
        m.update(false, true);
        let after_push = m.value();
        m.update(false, false);
        assert!(m.value() < after_push);
        assert!((m.value() - (after_push - 0.005)).abs() < 1e-7);
    }

    #[test]
    fn set_value_overrides_accumulator() {
        let mut m = Movement::new(0.01, 0.1, 0.9, 0.0);
        m.update(true, false);
        m.set_value(-1.0);
        assert_eq!(m.value(), -1.0);
    }
}
