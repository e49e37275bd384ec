//! Placement planner: holds the current map and area of interest and runs
//! one optimization per request.
//!
//! ```text
//!   set_map ──┐
//!             v
//!   start ──> crop to area ──> extract targets ──> seed swarm ──> run
//!                                                                  │
//!   last_result <──────────────────────────────────────────────────┘
//! ```
//!
//! Every `start` is a fresh run: nothing from a previous swarm is reused.

use log::info;

use crate::config::PlacementConfig;
use crate::core::WorldPoint;
use crate::error::{PlacementError, Result};
use crate::geometry::Polygon;
use crate::grid::{OccupancyGrid, crop_map};
use crate::io::{SvgConfig, SvgVisualizer};
use crate::pso::{CancelToken, optimize};
use crate::result::PlacementResult;
use crate::sensor::SensorKind;
use crate::targets::{TargetSet, extract_targets};

/// Everything produced by one run.
#[derive(Clone, Debug)]
pub struct PlacementRun {
    /// Final placement
    pub result: PlacementResult,
    /// Grid the targets were extracted from (cropped when an area was set)
    pub map: OccupancyGrid,
    /// Area of interest, if any
    pub area: Option<Polygon>,
    /// Targets and perimeter of the run
    pub targets: TargetSet,
    /// Sensor model used
    pub model: SensorKind,
}

impl PlacementRun {
    /// Which targets the final placement covers.
    pub fn coverage_mask(&self) -> Vec<bool> {
        self.result.coverage_mask(&self.targets.targets, &self.model)
    }

    /// SVG builder preloaded with map, area, targets and sensors.
    pub fn visualizer(&self, config: SvgConfig) -> SvgVisualizer<'_> {
        let mut svg = SvgVisualizer::new(&self.map, config)
            .with_title(format!(
                "{} sensors, coverage {:.1}% ({})",
                self.result.poses.len(),
                self.result.coverage * 100.0,
                self.result.termination.name()
            ))
            .with_targets(&self.targets.targets, &self.coverage_mask())
            .with_sensors(&self.result.poses, self.result.outlines(&self.model));
        if let Some(area) = &self.area {
            svg = svg.with_area(area.vertices());
        }
        svg
    }
}

/// Map, area of interest and configuration for placement requests.
#[derive(Clone, Debug)]
pub struct PlacementPlanner {
    config: PlacementConfig,
    map: Option<OccupancyGrid>,
    area: Option<Vec<WorldPoint>>,
    last_result: Option<PlacementResult>,
}

impl PlacementPlanner {
    /// Create a planner. The area of interest is taken from `config.area`.
    pub fn new(config: PlacementConfig) -> Self {
        let area = config.area.vertices();
        Self {
            config,
            map: None,
            area,
            last_result: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Replace the configuration. The area of interest is left unchanged.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
    }

    /// Set the map used by the next run.
    pub fn set_map(&mut self, map: OccupancyGrid) {
        info!(
            "[Planner] map set: {}x{} @ {:.3} m",
            map.width(),
            map.height(),
            map.resolution()
        );
        self.map = Some(map);
    }

    /// Forget the map; `start` will fail with [`PlacementError::NoMap`].
    pub fn clear_map(&mut self) {
        self.map = None;
    }

    /// Current map.
    pub fn map(&self) -> Option<&OccupancyGrid> {
        self.map.as_ref()
    }

    /// Restrict targets to a polygon. Validated when the run starts.
    pub fn set_area_of_interest(&mut self, vertices: Vec<WorldPoint>) {
        self.area = Some(vertices);
    }

    /// Use the whole map.
    pub fn clear_area_of_interest(&mut self) {
        self.area = None;
    }

    /// Current area-of-interest vertices.
    pub fn area_of_interest(&self) -> Option<&[WorldPoint]> {
        self.area.as_deref()
    }

    /// Result of the most recent successful run.
    pub fn last_result(&self) -> Option<&PlacementResult> {
        self.last_result.as_ref()
    }

    /// Run one optimization.
    pub fn start(&mut self) -> Result<PlacementRun> {
        self.start_with_cancel(&CancelToken::new())
    }

    /// Run one optimization, stopping early if `cancel` is triggered.
    pub fn start_with_cancel(&mut self, cancel: &CancelToken) -> Result<PlacementRun> {
        self.last_result = None;

        let map = self.map.as_ref().ok_or(PlacementError::NoMap)?;
        self.config.validate()?;
        let area = self.area.clone().map(Polygon::new).transpose()?;

        let grid = match &area {
            Some(polygon) => {
                let region = polygon.bounding_box().expand(self.config.area.crop_margin);
                crop_map(&region, map)
            }
            None => map.clone(),
        };
        let targets = extract_targets(&grid, area.as_ref());
        let model = self.config.sensor.to_model();

        info!(
            "[Planner] starting: {} targets, {} perimeter cells, {} {} sensors, swarm of {}",
            targets.len(),
            targets.perimeter.len(),
            self.config.sensor.count,
            model.name(),
            self.config.pso.swarm_size
        );

        let result = optimize(
            targets.clone(),
            grid.world_bounds(),
            model.clone(),
            self.config.sensor.count,
            self.config.pso.clone(),
            cancel,
        )?;
        self.last_result = Some(result.clone());

        Ok(PlacementRun {
            result,
            map: grid,
            area,
            targets,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    #[test]
    fn test_start_without_map() {
        let mut planner = PlacementPlanner::new(PlacementConfig::default());
        assert!(matches!(planner.start(), Err(PlacementError::NoMap)));
        assert!(planner.last_result().is_none());
    }

    #[test]
    fn test_area_from_config() {
        let mut config = PlacementConfig::default();
        config.area.polygon = Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        let mut planner = PlacementPlanner::new(config);
        assert_eq!(planner.area_of_interest().map(|a| a.len()), Some(3));
        planner.clear_area_of_interest();
        assert!(planner.area_of_interest().is_none());
    }

    #[test]
    fn test_clear_map() {
        let mut planner = PlacementPlanner::new(PlacementConfig::default());
        planner.set_map(
            OccupancyGrid::filled(2, 2, 1.0, WorldPoint::ZERO, CellState::Free).unwrap(),
        );
        assert!(planner.map().is_some());
        planner.clear_map();
        assert!(matches!(planner.start(), Err(PlacementError::NoMap)));
    }
}
