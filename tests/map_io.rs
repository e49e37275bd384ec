//! File round trips: ROS maps, results and configuration.

mod common;

use approx::assert_relative_eq;
use drishti::io::{SvgConfig, export_ros_map, load_ros_map};
use drishti::{
    CellState, GridCoord, OccupancyGrid, PlacementConfig, PlacementPlanner, PlacementResult,
    WorldPoint,
};
use tempfile::TempDir;

fn mixed_grid() -> OccupancyGrid {
    let cells = (0..35)
        .map(|i| match i % 3 {
            0 => CellState::Free,
            1 => CellState::Occupied,
            _ => CellState::Unknown,
        })
        .collect();
    OccupancyGrid::from_cells(7, 5, 0.05, WorldPoint::new(-1.25, 2.5), cells).unwrap()
}

#[test]
fn test_ros_map_round_trip() {
    let dir = TempDir::new().unwrap();
    let stem = dir.path().join("room");
    let grid = mixed_grid();

    export_ros_map(&grid, &stem).unwrap();
    assert!(dir.path().join("room.pgm").exists());
    assert!(dir.path().join("room.yaml").exists());

    let loaded = load_ros_map(&dir.path().join("room.yaml")).unwrap();
    assert_eq!(loaded.width(), 7);
    assert_eq!(loaded.height(), 5);
    assert_relative_eq!(loaded.resolution(), 0.05);
    assert_relative_eq!(loaded.origin().x, -1.25);
    assert_relative_eq!(loaded.origin().y, 2.5);
    assert_eq!(loaded.cells(), grid.cells());
}

#[test]
fn test_load_hand_written_map() {
    let dir = TempDir::new().unwrap();
    // 3x2 image, top row first: free, occupied, unknown / occupied, free, free
    let mut pgm = b"P5\n3 2\n255\n".to_vec();
    pgm.extend_from_slice(&[254, 0, 205, 0, 254, 254]);
    std::fs::write(dir.path().join("hand.pgm"), pgm).unwrap();
    std::fs::write(
        dir.path().join("hand.yaml"),
        "image: hand.pgm\nresolution: 0.5\norigin: [1.0, 2.0, 0.0]\nnegate: 0\n",
    )
    .unwrap();

    let grid = load_ros_map(&dir.path().join("hand.yaml")).unwrap();
    // Grid row 0 is the bottom image row
    assert_eq!(grid.get(GridCoord::new(0, 0)), CellState::Occupied);
    assert_eq!(grid.get(GridCoord::new(1, 0)), CellState::Free);
    assert_eq!(grid.get(GridCoord::new(0, 1)), CellState::Free);
    assert_eq!(grid.get(GridCoord::new(1, 1)), CellState::Occupied);
    assert_eq!(grid.get(GridCoord::new(2, 1)), CellState::Unknown);

    let center = grid.map_to_world(GridCoord::new(0, 0));
    assert_relative_eq!(center.x, 1.25);
    assert_relative_eq!(center.y, 2.25);
}

#[test]
fn test_missing_map_image() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("broken.yaml"),
        "image: nowhere.pgm\nresolution: 0.05\norigin: [0.0, 0.0, 0.0]\n",
    )
    .unwrap();
    assert!(load_ros_map(&dir.path().join("broken.yaml")).is_err());
}

#[test]
fn test_result_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config = common::circular_config(2, 3.0, common::pso(4, 5, 0.95, 17));
    let mut planner = PlacementPlanner::new(config);
    planner.set_map(common::walled_room(8, 8));
    let run = planner.start().unwrap();

    let path = dir.path().join("placement.yaml");
    run.result.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("termination"));

    let reloaded: PlacementResult = serde_yaml::from_str(&text).unwrap();
    assert_eq!(reloaded.poses.len(), run.result.poses.len());
    assert_eq!(reloaded.termination, run.result.termination);
    assert_eq!(reloaded.covered_targets, run.result.covered_targets);
    assert_eq!(reloaded.trace.len(), run.result.trace.len());
}

#[test]
fn test_svg_saved_next_to_result() {
    let dir = TempDir::new().unwrap();
    let config = common::circular_config(1, 2.0, common::pso(3, 2, 0.95, 5));
    let mut planner = PlacementPlanner::new(config);
    planner.set_map(common::free_grid(6, 6));
    let run = planner.start().unwrap();

    let path = dir.path().join("placement.svg");
    run.visualizer(SvgConfig::with_scale(20.0)).save(&path).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("</svg>"));
}

#[test]
fn test_config_file_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("placement.yaml");
    std::fs::write(
        &path,
        "sensor:\n  count: 3\n  open_angles: [0.5, 1.0]\npso:\n  c1: 0.6\n  seed: 99\n",
    )
    .unwrap();

    let config = PlacementConfig::load(&path).unwrap();
    assert_eq!(config.sensor.count, 3);
    assert_eq!(config.sensor.open_angles, [0.5, 1.0]);
    assert_relative_eq!(config.pso.inertia_weight, 0.6);
    assert_eq!(config.pso.seed, Some(99));
    assert_eq!(config.pso.swarm_size, 20);
    assert!(config.validate().is_ok());
}

#[test]
fn test_shipped_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/placement.yaml");
    let config = PlacementConfig::load(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.pso.seed, Some(42));
}
