//! Main PlacementConfig and loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::area::AreaSection;
use super::error::{ConfigError, ConfigLoadError};
use super::output::OutputSection;
use super::sensor::SensorSection;
use crate::pso::PsoConfig;

/// Full placement configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PlacementConfig {
    /// Sensor model, count and motion limits
    #[serde(default)]
    pub sensor: SensorSection,

    /// Particle swarm settings
    #[serde(default)]
    pub pso: PsoConfig,

    /// Area of interest
    #[serde(default)]
    pub area: AreaSection,

    /// Output files
    #[serde(default)]
    pub output: OutputSection,
}

impl PlacementConfig {
    /// Default config file location.
    pub const DEFAULT_PATH: &'static str = "configs/placement.yaml";

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default path (configs/placement.yaml), or defaults if absent
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(Self::DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensor.validate()?;
        self.pso.validate()?;
        self.area.validate()
    }
}
