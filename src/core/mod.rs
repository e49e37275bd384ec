//! Core types shared by every stage of the placement pipeline.
//!
//! - [`WorldPoint`] / [`GridCoord`]: metric points and integer cell indices
//! - [`SensorPose`] / [`SensorVelocity`]: planar sensor state used by the swarm
//! - [`math`]: angle helpers (wrapping, shortest differences)

pub mod math;
mod point;
mod pose;

pub use point::{GridCoord, WorldPoint};
pub use pose::{SensorPose, SensorVelocity};
