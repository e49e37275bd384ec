//! Area-of-interest configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigError;
use crate::core::WorldPoint;

/// Area of interest settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AreaSection {
    /// Polygon vertices `[x, y]` in world coordinates. None means the whole map.
    #[serde(default)]
    pub polygon: Option<Vec<[f32; 2]>>,

    /// Margin kept around the polygon bounding box when cropping (meters)
    #[serde(default = "defaults::crop_margin")]
    pub crop_margin: f32,
}

impl Default for AreaSection {
    fn default() -> Self {
        Self {
            polygon: None,
            crop_margin: defaults::crop_margin(),
        }
    }
}

impl AreaSection {
    /// Polygon vertices as world points.
    pub fn vertices(&self) -> Option<Vec<WorldPoint>> {
        self.polygon
            .as_ref()
            .map(|p| p.iter().copied().map(WorldPoint::from).collect())
    }

    /// Crop margin must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.crop_margin.is_finite() && self.crop_margin >= 0.0) {
            return Err(ConfigError::invalid(
                "area.crop_margin",
                format!("{} must be non-negative", self.crop_margin),
            ));
        }
        Ok(())
    }
}
