//! Test utilities for placement scenarios.
//!
//! Grids, area polygons and configurations shared by the integration tests.

#![allow(dead_code)]

use drishti::config::SensorModelType;
use drishti::{
    CellState, GridCoord, MotionLimits, OccupancyGrid, PlacementConfig, PsoConfig, WorldPoint,
};

/// All-free grid with 1 m cells and its origin at (0, 0).
pub fn free_grid(width: usize, height: usize) -> OccupancyGrid {
    OccupancyGrid::filled(width, height, 1.0, WorldPoint::ZERO, CellState::Free)
        .expect("valid grid")
}

/// Free room with an occupied one-cell wall around it.
pub fn walled_room(width: usize, height: usize) -> OccupancyGrid {
    let mut grid = free_grid(width, height);
    for x in 0..width as i32 {
        grid.set(GridCoord::new(x, 0), CellState::Occupied);
        grid.set(GridCoord::new(x, height as i32 - 1), CellState::Occupied);
    }
    for y in 0..height as i32 {
        grid.set(GridCoord::new(0, y), CellState::Occupied);
        grid.set(GridCoord::new(width as i32 - 1, y), CellState::Occupied);
    }
    grid
}

/// Axis-aligned rectangle as polygon vertices, counter-clockwise.
pub fn rectangle(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<WorldPoint> {
    vec![
        WorldPoint::new(min_x, min_y),
        WorldPoint::new(max_x, min_y),
        WorldPoint::new(max_x, max_y),
        WorldPoint::new(min_x, max_y),
    ]
}

/// Generous motion limits for small test maps.
pub fn test_limits() -> MotionLimits {
    MotionLimits::uniform(1.0, 0.5)
}

/// Seeded, sequential PSO settings.
pub fn pso(swarm_size: usize, max_iterations: usize, threshold: f32, seed: u64) -> PsoConfig {
    PsoConfig {
        swarm_size,
        max_iterations,
        coverage_threshold: threshold,
        ..PsoConfig::default()
    }
    .with_seed(seed)
}

/// Planner configuration with omnidirectional circular sensors.
pub fn circular_config(count: usize, range: f32, pso: PsoConfig) -> PlacementConfig {
    let mut config = PlacementConfig::default();
    config.sensor.model = SensorModelType::Circular;
    config.sensor.count = count;
    config.sensor.range = range;
    config.pso = pso;
    config
}
