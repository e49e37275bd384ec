//! Angle helpers.
//!
//! All angles are in radians, counter-clockwise positive. Two wrapping
//! conventions are used:
//! - bearings and differences live in [-π, π)
//! - sensor headings live in [0, 2π)

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use drishti::core::math::normalize_angle;
/// use std::f32::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-6);
/// assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Wrap a heading to [0, 2π).
///
/// # Example
/// ```
/// use drishti::core::math::wrap_heading;
/// use std::f32::consts::PI;
///
/// assert!((wrap_heading(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
/// assert!(wrap_heading(0.0).abs() < 1e-6);
/// ```
#[inline]
pub fn wrap_heading(angle: f32) -> f32 {
    let a = angle.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if a >= TWO_PI { 0.0 } else { a }
}

/// Signed shortest angular difference from `from` to `to`, in [-π, π).
///
/// Positive result means counter-clockwise rotation from `from` to `to`.
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Clamp a value to the symmetric interval [-limit, limit].
#[inline]
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    value.clamp(-limit, limit)
}
