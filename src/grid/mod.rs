//! Occupancy grid input model.
//!
//! The grid is a row-major array of [`CellState`] with metadata placing it
//! in the world:
//!
//! ```text
//!   y ^
//!     |  (0,h-1) ...  (w-1,h-1)
//!     |    :             :
//!     |  (0,0)   ...  (w-1,0)
//!     +-------------------------> x
//!   origin (rotated by origin_yaw)
//! ```
//!
//! Cell `(x, y)` lives at index `y * width + x` and its world position is
//! the cell center. [`crop_map`] cuts a sub-grid out around a region of
//! interest while keeping cells aligned with the source.

mod crop;
mod occupancy;

pub use crop::crop_map;
pub use occupancy::{CellCounts, CellState, GridError, OccupancyGrid};
