//! Error types for placement runs.

use thiserror::Error;

use crate::config::{ConfigError, ConfigLoadError};
use crate::geometry::PolygonError;
use crate::grid::GridError;
use crate::io::MapLoadError;

/// Placement errors
#[derive(Error, Debug)]
pub enum PlacementError {
    /// No map has been set
    #[error("no map available, refusing to start")]
    NoMap,

    /// Area of interest is not a usable polygon
    #[error("invalid area of interest: {0}")]
    InvalidPolygon(#[from] PolygonError),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Configuration file could not be loaded
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigLoadError),

    /// Map file could not be loaded
    #[error("failed to load map: {0}")]
    Map(#[from] MapLoadError),

    /// Map data is inconsistent
    #[error("invalid map: {0}")]
    Grid(#[from] GridError),

    /// Swarm used before seeding
    #[error("swarm has not been seeded")]
    NotSeeded,
}

/// Result type for placement operations
pub type Result<T> = std::result::Result<T, PlacementError>;
