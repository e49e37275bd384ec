//! Sensor pose and velocity.

use serde::{Deserialize, Serialize};

use super::math::wrap_heading;
use super::point::WorldPoint;

/// Planar sensor pose.
///
/// The heading is kept wrapped to [0, 2π) by every constructor and
/// update path in the crate.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorPose {
    /// X position in meters
    pub x: f32,
    /// Y position in meters
    pub y: f32,
    /// Heading in radians, [0, 2π)
    pub yaw: f32,
}

impl SensorPose {
    /// Create a pose, wrapping the heading to [0, 2π).
    #[inline]
    pub fn new(x: f32, y: f32, yaw: f32) -> Self {
        Self {
            x,
            y,
            yaw: wrap_heading(yaw),
        }
    }

    /// Pose at a point with the given heading.
    #[inline]
    pub fn at(position: WorldPoint, yaw: f32) -> Self {
        Self::new(position.x, position.y, yaw)
    }

    /// Position component.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// All components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.yaw.is_finite()
    }
}

/// Per-sensor velocity: linear x/y in m per sweep, angular z in rad per sweep.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorVelocity {
    /// Linear velocity along X
    pub linear_x: f32,
    /// Linear velocity along Y
    pub linear_y: f32,
    /// Angular velocity about Z
    pub angular_z: f32,
}

impl SensorVelocity {
    /// Zero velocity.
    pub const ZERO: SensorVelocity = SensorVelocity {
        linear_x: 0.0,
        linear_y: 0.0,
        angular_z: 0.0,
    };

    /// Create a velocity
    #[inline]
    pub fn new(linear_x: f32, linear_y: f32, angular_z: f32) -> Self {
        Self {
            linear_x,
            linear_y,
            angular_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::TWO_PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_pose_wraps_heading() {
        let pose = SensorPose::new(1.0, 2.0, -0.5);
        assert_relative_eq!(pose.yaw, TWO_PI - 0.5, epsilon = 1e-5);

        let pose = SensorPose::new(1.0, 2.0, TWO_PI * 3.0 + 0.25);
        assert_relative_eq!(pose.yaw, 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_pose_position() {
        let pose = SensorPose::new(1.5, -2.0, 0.0);
        assert_eq!(pose.position(), WorldPoint::new(1.5, -2.0));
        assert!(pose.is_finite());
        assert!(!SensorPose::new(f32::NAN, 0.0, 0.0).is_finite());
    }
}
