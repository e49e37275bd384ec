//! Per-sensor motion limits.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Maximum absolute velocity per axis, applied once per sweep.
///
/// Index 0..3 maps to x, y, z. The optimizer only moves sensors in the
/// plane, so it reads `linear[0]`, `linear[1]` and `angular[2]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionLimits {
    /// Linear limits (m per sweep)
    pub linear: [f32; 3],
    /// Angular limits (rad per sweep)
    pub angular: [f32; 3],
}

impl MotionLimits {
    /// Same limit on every linear axis and on every angular axis.
    pub fn uniform(linear: f32, angular: f32) -> Self {
        Self {
            linear: [linear; 3],
            angular: [angular; 3],
        }
    }

    /// Limit on X translation.
    #[inline]
    pub fn max_linear_x(&self) -> f32 {
        self.linear[0]
    }

    /// Limit on Y translation.
    #[inline]
    pub fn max_linear_y(&self) -> f32 {
        self.linear[1]
    }

    /// Limit on yaw rotation.
    #[inline]
    pub fn max_angular_z(&self) -> f32 {
        self.angular[2]
    }

    /// Every component must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, v) in self.linear.iter().enumerate() {
            if !(v.is_finite() && *v > 0.0) {
                return Err(ConfigError::invalid(
                    "sensor.max_linear_velocity",
                    format!("axis {} is {}, must be positive", axis, v),
                ));
            }
        }
        for (axis, v) in self.angular.iter().enumerate() {
            if !(v.is_finite() && *v > 0.0) {
                return Err(ConfigError::invalid(
                    "sensor.max_angular_velocity",
                    format!("axis {} is {}, must be positive", axis, v),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            linear: crate::config::defaults::max_linear_velocity(),
            angular: crate::config::defaults::max_angular_velocity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_valid() {
        assert!(MotionLimits::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive() {
        let mut limits = MotionLimits::uniform(1.0, 0.5);
        limits.linear[1] = 0.0;
        assert!(limits.validate().is_err());

        let mut limits = MotionLimits::uniform(1.0, 0.5);
        limits.angular[2] = f32::NAN;
        assert!(limits.validate().is_err());

        let mut limits = MotionLimits::uniform(1.0, 0.5);
        limits.linear[0] = -1.0;
        assert!(limits.validate().is_err());
    }
}
