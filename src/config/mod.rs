//! Configuration loading.
//!
//! Everything is read from a single YAML file with sensible defaults for
//! every field, so an empty file (or no file) is a valid configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::config::PlacementConfig;
//!
//! // Load from default path (configs/placement.yaml)
//! let config = PlacementConfig::load_default()?;
//! config.validate()?;
//!
//! let model = config.sensor.to_model();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`SensorSection`] | Model, count, range, aperture, velocity limits |
//! | [`PsoConfig`](crate::pso::PsoConfig) | Swarm size, iterations, weights, seed |
//! | [`AreaSection`] | Area-of-interest polygon, crop margin |
//! | [`OutputSection`] | Output directory and SVG rendering |
//!
//! ## Example YAML
//!
//! ```yaml
//! sensor:
//!   model: fov            # fov | circular
//!   count: 5
//!   range: 5.0            # meters
//!   open_angles: [0.785, 0.785]
//! pso:
//!   swarm_size: 20
//!   max_iterations: 400
//!   coverage_threshold: 0.95
//!   seed: 42
//! area:
//!   polygon: [[0, 0], [10, 0], [10, 8], [0, 8]]
//! ```

pub(crate) mod defaults;
mod area;
mod error;
mod output;
mod placement;
mod sensor;

pub use area::AreaSection;
pub use error::{ConfigError, ConfigLoadError};
pub use output::OutputSection;
pub use placement::PlacementConfig;
pub use sensor::{SensorModelType, SensorSection};
