//! Target and perimeter extraction.
//!
//! Every grid cell is visited once and lands in exactly one bucket:
//!
//! | Polygon location | Free cell | Other cell |
//! |------------------|-----------|------------|
//! | Inside           | target    | blocked    |
//! | Outside          | perimeter | perimeter  |
//! | Boundary         | skipped   | skipped    |
//!
//! Without a polygon every free cell is a target and every other cell is
//! blocked. Targets are the points the sensors must observe; perimeter
//! points are where the optimizer seeds sensors when an area of interest
//! is given.

use log::debug;

use crate::core::WorldPoint;
use crate::geometry::{Polygon, PolygonLocation};
use crate::grid::OccupancyGrid;

/// How the cells of a grid were classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Free cells inside the area (or anywhere, without a polygon)
    pub targets: usize,
    /// Occupied or unknown cells inside the area
    pub blocked: usize,
    /// Cells outside the polygon
    pub perimeter: usize,
    /// Cells whose center lies on the polygon boundary
    pub boundary: usize,
}

impl ExtractionStats {
    /// Sum of all buckets; equals the grid's cell count.
    pub fn total(&self) -> usize {
        self.targets + self.blocked + self.perimeter + self.boundary
    }
}

/// Output of [`extract_targets`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetSet {
    /// Points that must be observed
    pub targets: Vec<WorldPoint>,
    /// Candidate seed positions outside the area of interest
    pub perimeter: Vec<WorldPoint>,
    /// Whether an area-of-interest polygon was applied
    pub polygon_applied: bool,
    /// Cell accounting
    pub stats: ExtractionStats,
}

impl TargetSet {
    /// Number of targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// No targets at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Classify every cell of `grid` into targets, perimeter or neither.
///
/// Cells are visited in row-major order, so output order is deterministic.
pub fn extract_targets(grid: &OccupancyGrid, polygon: Option<&Polygon>) -> TargetSet {
    let mut set = TargetSet {
        polygon_applied: polygon.is_some(),
        ..Default::default()
    };

    for (coord, state) in grid.iter() {
        let center = grid.map_to_world(coord);
        let location = polygon.map_or(PolygonLocation::Inside, |p| p.locate(center));
        match location {
            PolygonLocation::Inside if state.is_free() => {
                set.targets.push(center);
                set.stats.targets += 1;
            }
            PolygonLocation::Inside => set.stats.blocked += 1,
            PolygonLocation::Outside => {
                set.perimeter.push(center);
                set.stats.perimeter += 1;
            }
            PolygonLocation::Boundary => set.stats.boundary += 1,
        }
    }

    debug!(
        "[Targets] {} targets, {} blocked, {} perimeter, {} on boundary",
        set.stats.targets, set.stats.blocked, set.stats.perimeter, set.stats.boundary
    );
    set
}
