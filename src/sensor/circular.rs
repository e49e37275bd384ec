//! Omnidirectional range-only model.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{MotionLimits, OUTLINE_SEGMENTS, SensorModel, arc, within_range};
use crate::config::ConfigError;
use crate::core::{SensorPose, WorldPoint};

/// Sensor that sees every target within range, regardless of heading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircularModel {
    /// Maximum sensing distance (m)
    pub range: f32,
    /// Velocity limits
    pub limits: MotionLimits,
}

impl CircularModel {
    /// Create a model.
    pub fn new(range: f32, limits: MotionLimits) -> Self {
        Self { range, limits }
    }
}

impl SensorModel for CircularModel {
    #[inline]
    fn covers(&self, pose: &SensorPose, target: WorldPoint) -> bool {
        pose.is_finite() && within_range(pose, target, self.range)
    }

    fn range(&self) -> f32 {
        self.range
    }

    fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    /// Range must be positive.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(ConfigError::invalid(
                "sensor.range",
                format!("{} must be positive", self.range),
            ));
        }
        self.limits.validate()
    }

    fn outline(&self, pose: &SensorPose) -> Vec<WorldPoint> {
        arc(pose, self.range, 0.0, 2.0 * PI, OUTLINE_SEGMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_only() {
        let m = CircularModel::new(2.0, MotionLimits::uniform(1.0, 0.5));
        let pose = SensorPose::new(0.0, 0.0, 0.0);
        assert!(m.covers(&pose, WorldPoint::new(-1.9, 0.0)));
        assert!(m.covers(&pose, WorldPoint::new(0.0, -2.0)));
        assert!(!m.covers(&pose, WorldPoint::new(1.5, 1.5)));
    }

    #[test]
    fn test_outline_closes() {
        let m = CircularModel::new(1.0, MotionLimits::uniform(1.0, 0.5));
        let outline = m.outline(&SensorPose::new(0.0, 0.0, 0.0));
        assert_eq!(outline.len(), OUTLINE_SEGMENTS + 1);
        let first = outline[0];
        let last = outline[OUTLINE_SEGMENTS];
        assert!(first.distance(&last) < 1e-4);
    }
}
