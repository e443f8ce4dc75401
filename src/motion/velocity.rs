//! Clamped, traction-damped scalar velocity.

/// A single-axis velocity driven by a pair of opposing inputs.
///
/// Each [`update`](Velocity::update) nudges the velocity by `start_speed` in the
/// held direction and clamps it into `[-max_speed, max_speed]`. When neither
/// direction is held the velocity is multiplied by `traction`, so a traction of
/// `1.0` keeps the last speed forever and anything below it decays toward zero.
///
/// # Examples
///
/// ```
/// use mazewalk::motion::Velocity;
///
/// let mut v = Velocity::new(0.01, 0.1, 0.9);
/// v.update(true, false);
/// assert_eq!(v.value(), 0.01);
/// v.update(false, false);
/// assert!((v.value() - 0.009).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    start_speed: f32,
    max_speed: f32,
    traction: f32,
    velocity: f32,
}

impl Velocity {
    /// Creates a velocity at rest.
    ///
    /// # Arguments
    /// * `start_speed` - Acceleration applied per tick while a direction is held.
    /// * `max_speed` - Magnitude the velocity is clamped to.
    /// * `traction` - Damping factor applied on ticks without input.
    pub fn new(start_speed: f32, max_speed: f32, traction: f32) -> Self {
        Self {
            start_speed,
            max_speed,
            traction,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.velocity
    }

    /// Overrides the current velocity, e.g. to zero a jump on landing.
    pub fn set_value(&mut self, value: f32) {
        self.velocity = value;
    }

    /// Advances the velocity by one tick.
    ///
    /// When both inputs are held, `backward` wins.
    pub fn update(&mut self, forward: bool, backward: bool) {
        let acc = if backward {
            -self.start_speed
        } else if forward {
            self.start_speed
        } else {
            0.0
        };

        self.velocity += acc;
        if self.velocity > self.max_speed {
            self.velocity = self.max_speed;
        } else if self.velocity < -self.max_speed {
            self.velocity = -self.max_speed;
        }

        if acc == 0.0 {
            self.velocity *= self.traction;
        }
    }
}
