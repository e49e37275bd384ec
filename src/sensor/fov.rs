//! Angular field-of-view model.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{COINCIDENT_DISTANCE, MotionLimits, OUTLINE_SEGMENTS, SensorModel, arc, within_range};
use crate::config::ConfigError;
use crate::core::math::normalize_angle;
use crate::core::{SensorPose, WorldPoint};

/// Sensor with a limited range and an asymmetric angular window.
///
/// `open_angles[0]` is the half-angle to the left of the heading
/// (counter-clockwise), `open_angles[1]` the half-angle to the right.
/// Both are in [0, π]; `[π, π]` is a full circle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FovModel {
    /// Maximum sensing distance (m)
    pub range: f32,
    /// Left and right half-angles (rad)
    pub open_angles: [f32; 2],
    /// Velocity limits
    pub limits: MotionLimits,
}

impl FovModel {
    /// Create a model.
    pub fn new(range: f32, open_angles: [f32; 2], limits: MotionLimits) -> Self {
        Self {
            range,
            open_angles,
            limits,
        }
    }

    /// Symmetric window of total width `fov` radians.
    pub fn symmetric(range: f32, fov: f32, limits: MotionLimits) -> Self {
        Self::new(range, [fov * 0.5, fov * 0.5], limits)
    }

    /// Full-circle window.
    pub fn omnidirectional(range: f32, limits: MotionLimits) -> Self {
        Self::new(range, [PI, PI], limits)
    }

    /// Total angular width of the window.
    #[inline]
    pub fn total_angle(&self) -> f32 {
        self.open_angles[0] + self.open_angles[1]
    }
}

impl SensorModel for FovModel {
    fn covers(&self, pose: &SensorPose, target: WorldPoint) -> bool {
        if !pose.is_finite() || !within_range(pose, target, self.range) {
            return false;
        }
        let position = pose.position();
        if position.distance_squared(&target) <= COINCIDENT_DISTANCE * COINCIDENT_DISTANCE {
            return true;
        }
        let delta = normalize_angle(position.angle_to(&target) - pose.yaw);
        if delta <= -PI {
            // The rear ray closes both sides of the window
            self.open_angles[0] >= PI || self.open_angles[1] >= PI
        } else if delta >= 0.0 {
            delta <= self.open_angles[0]
        } else {
            -delta <= self.open_angles[1]
        }
    }

    fn range(&self) -> f32 {
        self.range
    }

    fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    /// Range must be positive and each half-angle in [0, π].
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(ConfigError::invalid(
                "sensor.range",
                format!("{} must be positive", self.range),
            ));
        }
        for angle in self.open_angles {
            if !(angle.is_finite() && (0.0..=PI).contains(&angle)) {
                return Err(ConfigError::invalid(
                    "sensor.open_angles",
                    format!("{} outside [0, pi]", angle),
                ));
            }
        }
        self.limits.validate()
    }

    fn outline(&self, pose: &SensorPose) -> Vec<WorldPoint> {
        let total = self.total_angle();
        if total >= 2.0 * PI {
            return arc(pose, self.range, 0.0, 2.0 * PI, OUTLINE_SEGMENTS);
        }
        let segments = ((total / (2.0 * PI)) * OUTLINE_SEGMENTS as f32).ceil() as usize;
        let mut points = vec![pose.position()];
        points.extend(arc(
            pose,
            self.range,
            pose.yaw - self.open_angles[1],
            pose.yaw + self.open_angles[0],
            segments,
        ));
        points.push(pose.position());
        points
    }
}
