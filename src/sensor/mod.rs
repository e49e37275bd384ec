//! Sensor visibility models.
//!
//! A [`SensorModel`] decides whether a sensor at a given pose observes a
//! target point. Visibility is purely geometric: a range check plus an
//! angular window. There is no occlusion by occupied cells.
//!
//! ```text
//!                 left half-angle
//!              .-'  ^ yaw
//!           .-'     |
//!   sensor o--------+----------> range
//!           '-.     |
//!              '-.  v
//!                 right half-angle
//! ```
//!
//! Two models are provided: [`FovModel`] (angular window) and
//! [`CircularModel`] (range only). [`SensorKind`] dispatches between them
//! so the optimizer stays monomorphic.

mod circular;
mod fov;
mod limits;

pub use circular::CircularModel;
pub use fov::FovModel;
pub use limits::MotionLimits;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::{SensorPose, WorldPoint};

/// Targets closer than this to the sensor are always visible.
pub const COINCIDENT_DISTANCE: f32 = 1e-6;

/// Number of arc segments used when drawing a full-circle outline.
pub const OUTLINE_SEGMENTS: usize = 32;

/// Geometric visibility model for one sensor.
pub trait SensorModel: Send + Sync {
    /// Whether a sensor at `pose` observes `target`.
    ///
    /// Must return false for non-finite poses.
    fn covers(&self, pose: &SensorPose, target: WorldPoint) -> bool;

    /// Maximum sensing distance in meters.
    fn range(&self) -> f32;

    /// Per-sweep velocity limits used by the optimizer.
    fn limits(&self) -> &MotionLimits;

    /// Reject parameters the optimizer cannot move with.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Closed outline of the sensed region, for visualization.
    fn outline(&self, pose: &SensorPose) -> Vec<WorldPoint>;
}

/// Configured sensor model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum SensorKind {
    /// Angular field of view
    Fov(FovModel),
    /// Omnidirectional range-only
    Circular(CircularModel),
}

impl SensorKind {
    /// Model name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Fov(_) => "fov",
            SensorKind::Circular(_) => "circular",
        }
    }
}

impl SensorModel for SensorKind {
    #[inline]
    fn covers(&self, pose: &SensorPose, target: WorldPoint) -> bool {
        match self {
            SensorKind::Fov(m) => m.covers(pose, target),
            SensorKind::Circular(m) => m.covers(pose, target),
        }
    }

    fn range(&self) -> f32 {
        match self {
            SensorKind::Fov(m) => m.range(),
            SensorKind::Circular(m) => m.range(),
        }
    }

    fn limits(&self) -> &MotionLimits {
        match self {
            SensorKind::Fov(m) => m.limits(),
            SensorKind::Circular(m) => m.limits(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SensorKind::Fov(m) => m.validate(),
            SensorKind::Circular(m) => m.validate(),
        }
    }

    fn outline(&self, pose: &SensorPose) -> Vec<WorldPoint> {
        match self {
            SensorKind::Fov(m) => m.outline(pose),
            SensorKind::Circular(m) => m.outline(pose),
        }
    }
}

impl From<FovModel> for SensorKind {
    fn from(model: FovModel) -> Self {
        SensorKind::Fov(model)
    }
}

impl From<CircularModel> for SensorKind {
    fn from(model: CircularModel) -> Self {
        SensorKind::Circular(model)
    }
}

/// Squared-distance range check shared by the models.
#[inline]
pub(crate) fn within_range(pose: &SensorPose, target: WorldPoint, range: f32) -> bool {
    pose.position().distance_squared(&target) <= range * range
}

/// Points along an arc centered on `pose`, from `start` to `end` (radians).
pub(crate) fn arc(
    pose: &SensorPose,
    radius: f32,
    start: f32,
    end: f32,
    segments: usize,
) -> Vec<WorldPoint> {
    let center = pose.position();
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            center.point_at(start + (end - start) * t, radius)
        })
        .collect()
}
