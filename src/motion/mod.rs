//! Scalar motion integrators.
//!
//! These are the physics primitives behind every moving quantity in the walker:
//! [`Velocity`] accelerates toward a clamped top speed while a direction is held
//! and bleeds speed through traction once it is released, and [`Movement`]
//! accumulates a velocity into a running value such as a heading angle.

pub mod movement;
pub mod velocity;

pub use movement::Movement;
pub use velocity::Velocity;
