//! Math utilities for the renderer and the player physics.
//!
//! This module provides the [`Matrix`](mat::Matrix) transform type used for every
//! model, view and projection transform, plus small angle helpers.
//!
//! # Module Organization
//!
//! - [`mat`] module contains the 4x4 matrix type and its composition operators
//! - Utility functions like angle conversions are provided at root level

pub mod mat;

pub use mat::Matrix;

/// Converts degrees to radians.
///
/// This handles angle wrapping by first normalizing the input to the range [0, 360).
///
/// # Arguments
///
/// * `degrees` - The angle in degrees (can be any finite value)
///
/// # Returns
///
/// The angle in radians in range [0, 2π)
///
/// # Example
/// ```
/// use mazewalk::math::deg_to_rad;
///
/// assert_eq!(deg_to_rad(180.0), std::f32::consts::PI);
/// assert_eq!(deg_to_rad(540.0), std::f32::consts::PI);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}

/// Wraps an angle in radians into a texture-scroll offset measured in turns.
///
/// One full turn maps to one texture width. The result lies in `[-0.5, 0.5)`,
/// so a heading that grows without bound never loses precision in the
/// texture coordinate.
///
/// # Example
/// ```
/// use mazewalk::math::wrap_turns;
///
/// assert_eq!(wrap_turns(0.0), 0.0);
/// assert!((wrap_turns(std::f32::consts::PI * 2.5) - 0.25).abs() < 1e-6);
/// ```
pub fn wrap_turns(radians: f32) -> f32 {
    let turns = radians / std::f32::consts::TAU;
    turns - (turns + 0.5).floor()
}
