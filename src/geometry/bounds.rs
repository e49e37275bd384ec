//! Axis-aligned bounding box.
//!
//! ```rust
//! use drishti::core::WorldPoint;
//! use drishti::geometry::Bounds;
//!
//! let mut bounds = Bounds::empty();
//! bounds.expand_to_include(WorldPoint::new(1.0, 1.0));
//! bounds.expand_to_include(WorldPoint::new(-2.0, 3.0));
//! assert_eq!(bounds.min, WorldPoint::new(-2.0, 1.0));
//! assert_eq!(bounds.max, WorldPoint::new(1.0, 3.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner (smallest x and y values).
    pub min: WorldPoint,
    /// Maximum corner (largest x and y values).
    pub max: WorldPoint,
}

impl Bounds {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) bounding box that expands to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: WorldPoint::new(f32::MAX, f32::MAX),
            max: WorldPoint::new(f32::MIN, f32::MIN),
        }
    }

    /// Smallest box containing every point. Empty for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = WorldPoint>>(points: I) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(p);
        }
        bounds
    }

    /// Check if the bounds are empty (inverted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Width (x extent).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height (y extent).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Point inside the box, edges included.
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Intersection of two boxes. Empty if they don't overlap.
    pub fn intersection(&self, other: &Bounds) -> Self {
        Self {
            min: WorldPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: WorldPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        }
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: WorldPoint) {
        self.min = WorldPoint::new(self.min.x.min(point.x), self.min.y.min(point.y));
        self.max = WorldPoint::new(self.max.x.max(point.x), self.max.y.max(point.y));
    }

    /// Expand bounds by a margin on all sides.
    #[inline]
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: WorldPoint::new(self.min.x - margin, self.min.y - margin),
            max: WorldPoint::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Clamp a point to lie inside the bounds.
    #[inline]
    pub fn clamp(&self, point: WorldPoint) -> WorldPoint {
        WorldPoint::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Corners in CCW order starting at `min`.
    #[inline]
    pub fn corners(&self) -> [WorldPoint; 4] {
        [
            self.min,
            WorldPoint::new(self.max.x, self.min.y),
            self.max,
            WorldPoint::new(self.min.x, self.max.y),
        ]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}
