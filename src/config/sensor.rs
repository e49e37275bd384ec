//! Sensor configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigError;
use crate::sensor::{CircularModel, FovModel, MotionLimits, SensorKind, SensorModel};

/// Which visibility model to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorModelType {
    /// Range plus angular window
    Fov,
    /// Range only
    Circular,
}

/// Sensor configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorSection {
    /// Visibility model
    #[serde(default = "defaults::sensor_model")]
    pub model: SensorModelType,

    /// Number of sensors to place
    #[serde(default = "defaults::sensor_count")]
    pub count: usize,

    /// Maximum sensing range (meters)
    #[serde(default = "defaults::sensor_range")]
    pub range: f32,

    /// Left and right half-angles of the field of view (radians).
    /// Ignored by the circular model.
    #[serde(default = "defaults::open_angles")]
    pub open_angles: [f32; 2],

    /// Linear velocity limit per axis (meters per sweep)
    #[serde(default = "defaults::max_linear_velocity")]
    pub max_linear_velocity: [f32; 3],

    /// Angular velocity limit per axis (radians per sweep)
    #[serde(default = "defaults::max_angular_velocity")]
    pub max_angular_velocity: [f32; 3],
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            model: defaults::sensor_model(),
            count: defaults::sensor_count(),
            range: defaults::sensor_range(),
            open_angles: defaults::open_angles(),
            max_linear_velocity: defaults::max_linear_velocity(),
            max_angular_velocity: defaults::max_angular_velocity(),
        }
    }
}

impl SensorSection {
    /// Velocity limits as configured.
    pub fn limits(&self) -> MotionLimits {
        MotionLimits {
            linear: self.max_linear_velocity,
            angular: self.max_angular_velocity,
        }
    }

    /// Build the visibility model.
    pub fn to_model(&self) -> SensorKind {
        match self.model {
            SensorModelType::Fov => {
                FovModel::new(self.range, self.open_angles, self.limits()).into()
            }
            SensorModelType::Circular => CircularModel::new(self.range, self.limits()).into(),
        }
    }

    /// Check count, range, angles and velocity limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::invalid("sensor.count", "at least one sensor is required"));
        }
        self.to_model().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let section = SensorSection::default();
        assert_eq!(section.count, 5);
        assert_eq!(section.range, 5.0);
        assert!(section.validate().is_ok());
        assert_eq!(section.to_model().name(), "fov");
    }

    #[test]
    fn test_circular_model() {
        let section = SensorSection {
            model: SensorModelType::Circular,
            range: 2.5,
            ..Default::default()
        };
        let model = section.to_model();
        assert_eq!(model.name(), "circular");
        assert_eq!(model.range(), 2.5);
    }

    #[test]
    fn test_zero_sensors_rejected() {
        let section = SensorSection {
            count: 0,
            ..Default::default()
        };
        let err = section.validate().unwrap_err();
        assert_eq!(err.field, "sensor.count");
    }

    #[test]
    fn test_bad_velocity_rejected() {
        let section = SensorSection {
            max_angular_velocity: [0.5, 0.5, 0.0],
            ..Default::default()
        };
        let err = section.validate().unwrap_err();
        assert_eq!(err.field, "sensor.max_angular_velocity");
    }
}
