//! # Drishti
//!
//! Coverage-driven sensor placement on 2D occupancy grids.
//!
//! ## Overview
//!
//! Given a map, an optional area-of-interest polygon and a number of
//! sensors, Drishti searches for sensor positions and headings that
//! maximize the fraction of free cells observed. The search is a particle
//! swarm: each particle is a full placement, and the swarm converges on
//! placements that cover the most targets with the least overlap.
//!
//! ## Pipeline
//!
//! - **Geometry**: point-in-polygon classification, bounding boxes
//! - **Grid**: occupancy grid, cell/world conversion, cropping
//! - **Targets**: free cells inside the area become targets, cells outside
//!   become seed positions
//! - **Sensor**: visibility models (`covers(pose, target)`)
//! - **PSO**: particles, swarm, termination (converged, exhausted, cancelled)
//! - **Result**: final poses, coverage, per-iteration trace
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{PlacementConfig, PlacementPlanner};
//! use drishti::io::load_ros_map;
//! use std::path::Path;
//!
//! let mut planner = PlacementPlanner::new(PlacementConfig::load_default()?);
//! planner.set_map(load_ros_map(Path::new("maps/office.yaml"))?);
//!
//! let run = planner.start()?;
//! println!("coverage {:.1}%", run.result.coverage * 100.0);
//! for pose in &run.result.poses {
//!     println!("sensor at ({:.2}, {:.2}) heading {:.2}", pose.x, pose.y, pose.yaw);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X right, Y up in the map plane
//! - Yaw in radians, CCW positive from +X, kept in [0, 2π) for sensors

#![warn(missing_docs)]

// Core types
pub mod core;

// Polygons and bounding boxes
pub mod geometry;

// Occupancy grid
pub mod grid;

// Visibility models
pub mod sensor;

// Target extraction
pub mod targets;

// Particle swarm optimizer
pub mod pso;

// Result projection
pub mod result;

// Planner facade
pub mod planner;

// Unified configuration
pub mod config;

// Map loading and export
pub mod io;

mod error;

// Re-export commonly used types
pub use crate::core::{GridCoord, SensorPose, SensorVelocity, WorldPoint};
pub use config::{ConfigError, ConfigLoadError, PlacementConfig};
pub use error::{PlacementError, Result};
pub use geometry::{Bounds, Polygon, PolygonLocation, point_in_polygon};
pub use grid::{CellState, OccupancyGrid, crop_map};
pub use planner::{PlacementPlanner, PlacementRun};
pub use pso::{CancelToken, PsoConfig, Swarm, Termination, optimize};
pub use result::PlacementResult;
pub use sensor::{CircularModel, FovModel, MotionLimits, SensorKind, SensorModel};
pub use targets::{TargetSet, extract_targets};
