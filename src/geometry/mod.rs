//! Planar geometry: bounding boxes and polygon classification.
//!
//! The area of interest is a simple polygon in world coordinates. Every
//! grid cell center is classified against it as one of
//! [`PolygonLocation::Inside`], [`PolygonLocation::Outside`] or
//! [`PolygonLocation::Boundary`]:
//!
//! ```text
//!   +-----------+        o  Outside   -> perimeter (sensor seeding)
//!   |  i   i    |  o     i  Inside    -> target (if free)
//!   |      i    b        b  Boundary  -> ignored
//!   +-----------+
//! ```

mod bounds;
mod polygon;

pub use bounds::Bounds;
pub use polygon::{BOUNDARY_TOLERANCE, Polygon, PolygonError, PolygonLocation, point_in_polygon};

/// Axis-aligned bounding box of a polygon.
#[inline]
pub fn bounding_box(polygon: &Polygon) -> Bounds {
    polygon.bounding_box()
}
