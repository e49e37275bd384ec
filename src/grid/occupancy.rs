//! Occupancy grid storage and coordinate conversion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GridCoord, WorldPoint};
use crate::geometry::Bounds;

/// Occupancy state of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Observed free space
    Free = 0,
    /// Observed obstacle
    Occupied = 1,
    /// Not observed
    #[default]
    Unknown = 2,
}

impl CellState {
    /// Convert a ROS `nav_msgs/OccupancyGrid` value: 0 free, negative
    /// unknown, positive occupied.
    #[inline]
    pub fn from_ros(value: i8) -> Self {
        match value {
            0 => CellState::Free,
            v if v < 0 => CellState::Unknown,
            _ => CellState::Occupied,
        }
    }

    /// ROS occupancy value for this state (0, 100 or -1).
    #[inline]
    pub fn to_ros(self) -> i8 {
        match self {
            CellState::Free => 0,
            CellState::Occupied => 100,
            CellState::Unknown => -1,
        }
    }

    /// Only free cells can be coverage targets.
    #[inline]
    pub fn is_free(self) -> bool {
        self == CellState::Free
    }
}

/// Grid construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Cell data does not match width * height
    #[error("cell data has {actual} entries, expected {expected}")]
    DataLength {
        /// width * height
        expected: usize,
        /// Entries supplied
        actual: usize,
    },

    /// Resolution must be positive and finite
    #[error("invalid resolution {0}")]
    InvalidResolution(f32),

    /// Origin has a NaN or infinite component
    #[error("map origin is not finite")]
    NonFiniteOrigin,
}

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Free cells
    pub free: usize,
    /// Occupied cells
    pub occupied: usize,
    /// Unknown cells
    pub unknown: usize,
}

impl CellCounts {
    /// Total number of cells.
    pub fn total(&self) -> usize {
        self.free + self.occupied + self.unknown
    }
}

/// Occupancy grid with world placement metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    resolution: f32,
    origin: WorldPoint,
    origin_yaw: f32,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Create a grid with every cell set to `state`.
    pub fn filled(
        width: usize,
        height: usize,
        resolution: f32,
        origin: WorldPoint,
        state: CellState,
    ) -> Result<Self, GridError> {
        Self::from_cells(width, height, resolution, origin, vec![state; width * height])
    }

    /// Create a grid from row-major cell states.
    pub fn from_cells(
        width: usize,
        height: usize,
        resolution: f32,
        origin: WorldPoint,
        cells: Vec<CellState>,
    ) -> Result<Self, GridError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GridError::InvalidResolution(resolution));
        }
        if !origin.is_finite() {
            return Err(GridError::NonFiniteOrigin);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::DataLength {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            resolution,
            origin,
            origin_yaw: 0.0,
            cells,
        })
    }

    /// Create a grid from ROS occupancy values (see [`CellState::from_ros`]).
    pub fn from_ros_data(
        width: usize,
        height: usize,
        resolution: f32,
        origin: WorldPoint,
        data: &[i8],
    ) -> Result<Self, GridError> {
        let cells = data.iter().map(|&v| CellState::from_ros(v)).collect();
        Self::from_cells(width, height, resolution, origin, cells)
    }

    /// Set the rotation of the grid about its origin.
    pub fn with_origin_yaw(mut self, yaw: f32) -> Result<Self, GridError> {
        if !yaw.is_finite() {
            return Err(GridError::NonFiniteOrigin);
        }
        self.origin_yaw = yaw;
        Ok(self)
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World position of the outer corner of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Rotation of the grid about its origin (radians).
    #[inline]
    pub fn origin_yaw(&self) -> f32 {
        self.origin_yaw
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell states.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Row-major index of a coordinate.
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        self.is_valid_coord(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// State at a coordinate. Out-of-bounds reads are [`CellState::Unknown`].
    #[inline]
    pub fn get(&self, coord: GridCoord) -> CellState {
        self.index(coord)
            .map(|i| self.cells[i])
            .unwrap_or(CellState::Unknown)
    }

    /// Set the state at a coordinate. Returns false if out of bounds.
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// World coordinates of a cell center.
    #[inline]
    pub fn map_to_world(&self, coord: GridCoord) -> WorldPoint {
        let local = WorldPoint::new(
            (coord.x as f32 + 0.5) * self.resolution,
            (coord.y as f32 + 0.5) * self.resolution,
        );
        self.origin + local.rotate(self.origin_yaw)
    }

    /// Cell containing a world point (may be out of bounds).
    #[inline]
    pub fn world_to_map(&self, point: WorldPoint) -> GridCoord {
        let local = self.to_local(point);
        GridCoord::new(
            (local.x / self.resolution).floor() as i32,
            (local.y / self.resolution).floor() as i32,
        )
    }

    /// Point expressed in the grid frame (origin at cell (0,0) corner, unrotated).
    #[inline]
    pub(crate) fn to_local(&self, point: WorldPoint) -> WorldPoint {
        (point - self.origin).rotate(-self.origin_yaw)
    }

    /// Axis-aligned world extent of the whole grid.
    pub fn world_bounds(&self) -> Bounds {
        let w = self.width as f32 * self.resolution;
        let h = self.height as f32 * self.resolution;
        Bounds::from_points(
            [
                WorldPoint::ZERO,
                WorldPoint::new(w, 0.0),
                WorldPoint::new(w, h),
                WorldPoint::new(0.0, h),
            ]
            .map(|corner| self.origin + corner.rotate(self.origin_yaw)),
        )
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, &state)| {
            (GridCoord::new((i % width) as i32, (i / width) as i32), state)
        })
    }

    /// Count cells by state.
    pub fn count_by_state(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for state in &self.cells {
            match state {
                CellState::Free => counts.free += 1,
                CellState::Occupied => counts.occupied += 1,
                CellState::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Cut out the cells overlapping `bounds` (see [`crate::grid::crop_map`]).
    pub fn crop(&self, bounds: &Bounds) -> OccupancyGrid {
        super::crop_map(bounds, self)
    }

    pub(crate) fn sub_grid(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> OccupancyGrid {
        let width = x1.saturating_sub(x0);
        let height = y1.saturating_sub(y0);
        let mut cells = Vec::with_capacity(width * height);
        for y in y0..y0 + height {
            let row = y * self.width;
            cells.extend_from_slice(&self.cells[row + x0..row + x0 + width]);
        }
        let offset = WorldPoint::new(x0 as f32 * self.resolution, y0 as f32 * self.resolution);
        OccupancyGrid {
            width,
            height,
            resolution: self.resolution,
            origin: self.origin + offset.rotate(self.origin_yaw),
            origin_yaw: self.origin_yaw,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn grid(width: usize, height: usize) -> OccupancyGrid {
        OccupancyGrid::filled(width, height, 0.5, WorldPoint::new(-1.0, 2.0), CellState::Free)
            .unwrap()
    }

    #[test]
    fn test_from_ros_values() {
        assert_eq!(CellState::from_ros(0), CellState::Free);
        assert_eq!(CellState::from_ros(-1), CellState::Unknown);
        assert_eq!(CellState::from_ros(100), CellState::Occupied);
        assert_eq!(CellState::from_ros(1), CellState::Occupied);
        assert_eq!(CellState::Occupied.to_ros(), 100);
        assert_eq!(CellState::from_ros(CellState::Unknown.to_ros()), CellState::Unknown);

        let g =
            OccupancyGrid::from_ros_data(2, 2, 1.0, WorldPoint::ZERO, &[0, 100, -1, 0]).unwrap();
        assert_eq!(g.get(GridCoord::new(0, 0)), CellState::Free);
        assert_eq!(g.get(GridCoord::new(1, 0)), CellState::Occupied);
        assert_eq!(g.get(GridCoord::new(0, 1)), CellState::Unknown);
        assert_eq!(g.get(GridCoord::new(1, 1)), CellState::Free);
    }

    #[test]
    fn test_rejects_bad_metadata() {
        let err = OccupancyGrid::from_cells(2, 2, 1.0, WorldPoint::ZERO, vec![CellState::Free; 3])
            .unwrap_err();
        assert_eq!(
            err,
            GridError::DataLength {
                expected: 4,
                actual: 3
            }
        );

        let err = OccupancyGrid::filled(2, 2, 0.0, WorldPoint::ZERO, CellState::Free).unwrap_err();
        assert_eq!(err, GridError::InvalidResolution(0.0));
    }

    #[test]
    fn test_map_to_world_is_cell_center() {
        let g = grid(4, 4);
        let p = g.map_to_world(GridCoord::new(0, 0));
        assert_relative_eq!(p.x, -0.75);
        assert_relative_eq!(p.y, 2.25);

        let p = g.map_to_world(GridCoord::new(3, 1));
        assert_relative_eq!(p.x, -1.0 + 3.5 * 0.5);
        assert_relative_eq!(p.y, 2.0 + 1.5 * 0.5);
    }

    #[test]
    fn test_world_to_map_inverts_map_to_world() {
        let g = grid(6, 5);
        for (coord, _) in g.iter() {
            assert_eq!(g.world_to_map(g.map_to_world(coord)), coord);
        }
    }

    #[test]
    fn test_rotated_origin() {
        let g = OccupancyGrid::filled(2, 1, 1.0, WorldPoint::ZERO, CellState::Free)
            .unwrap()
            .with_origin_yaw(FRAC_PI_2)
            .unwrap();
        // +X of the grid points along world +Y
        let p = g.map_to_world(GridCoord::new(1, 0));
        assert_relative_eq!(p.x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.5, epsilon = 1e-6);
        assert_eq!(g.world_to_map(p), GridCoord::new(1, 0));

        let b = g.world_bounds();
        assert_relative_eq!(b.min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(b.max.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut g = grid(3, 3);
        assert_eq!(g.get(GridCoord::new(-1, 0)), CellState::Unknown);
        assert!(!g.set(GridCoord::new(3, 0), CellState::Occupied));
        assert!(g.set(GridCoord::new(2, 2), CellState::Occupied));
        assert_eq!(g.get(GridCoord::new(2, 2)), CellState::Occupied);
        assert_eq!(g.index(GridCoord::new(2, 1)), Some(5));
    }

    #[test]
    fn test_count_by_state() {
        let mut g = grid(4, 2);
        g.set(GridCoord::new(0, 0), CellState::Occupied);
        g.set(GridCoord::new(1, 0), CellState::Unknown);
        let counts = g.count_by_state();
        assert_eq!(counts.free, 6);
        assert_eq!(counts.occupied, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), g.cell_count());
    }
}
