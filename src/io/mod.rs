//! Map loading and result export.
//!
//! - **ROS maps**: `map_server` YAML + PGM loading and export
//! - **SVG**: rendering of a placement over the map for inspection
//!
//! ```rust,ignore
//! use drishti::io::{load_ros_map, SvgConfig, SvgVisualizer};
//! use std::path::Path;
//!
//! let grid = load_ros_map(Path::new("maps/office.yaml"))?;
//! // ... run the planner ...
//! SvgVisualizer::new(&grid, SvgConfig::default())
//!     .with_title("office")
//!     .with_sensors(&result.poses, result.outlines(&model))
//!     .save(Path::new("output/placement.svg"))?;
//! ```

mod map_file;
pub mod pgm;
pub mod svg;

use thiserror::Error;

use crate::grid::GridError;

pub use map_file::{RosMapMetadata, export_ros_map, load_ros_map};
pub use svg::{SvgColorScheme, SvgConfig, SvgVisualizer};

/// Map loading errors
#[derive(Error, Debug)]
pub enum MapLoadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Image could not be decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Image decoded but is not a greymap
    #[error("PGM error: {0}")]
    Pgm(String),

    /// Metadata values are unusable
    #[error("invalid map metadata: {0}")]
    InvalidMetadata(String),

    /// Decoded grid is inconsistent
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// File could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// SVG formatting failed
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
}
