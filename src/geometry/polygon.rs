//! Simple polygons and point classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Bounds;
use crate::core::WorldPoint;

/// Distance (meters) within which a point counts as lying on an edge.
pub const BOUNDARY_TOLERANCE: f32 = 1e-4;

/// Where a point lies relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygonLocation {
    /// Strictly inside
    Inside,
    /// Strictly outside
    Outside,
    /// On an edge or vertex
    Boundary,
}

/// Polygon construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolygonError {
    /// Fewer than three vertices
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    TooFewVertices {
        /// Number of vertices supplied
        vertices: usize,
    },

    /// A vertex has a NaN or infinite coordinate
    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex {
        /// Index of the offending vertex
        index: usize,
    },
}

/// Simple polygon in world coordinates.
///
/// The closing edge from the last vertex back to the first is implicit.
/// Self-intersecting input is accepted; classification then follows the
/// even-odd rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<WorldPoint>,
}

impl Polygon {
    /// Minimum number of vertices.
    pub const MIN_VERTICES: usize = 3;

    /// Create a polygon from its vertices.
    pub fn new(vertices: Vec<WorldPoint>) -> Result<Self, PolygonError> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(PolygonError::TooFewVertices {
                vertices: vertices.len(),
            });
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(PolygonError::NonFiniteVertex { index });
        }
        Ok(Self { vertices })
    }

    /// Vertices in input order.
    #[inline]
    pub fn vertices(&self) -> &[WorldPoint] {
        &self.vertices
    }

    /// Edges as (start, end) pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (WorldPoint, WorldPoint)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Axis-aligned bounding box.
    pub fn bounding_box(&self) -> Bounds {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Classify a point against this polygon.
    pub fn locate(&self, point: WorldPoint) -> PolygonLocation {
        point_in_polygon(point, self)
    }
}

/// Classify a point as inside, outside, or on the boundary of a polygon.
///
/// Edge and vertex hits are detected first (within [`BOUNDARY_TOLERANCE`]),
/// then an even-odd ray cast along +X decides inside vs outside.
pub fn point_in_polygon(point: WorldPoint, polygon: &Polygon) -> PolygonLocation {
    if polygon.edges().any(|(a, b)| on_segment(point, a, b)) {
        return PolygonLocation::Boundary;
    }

    let mut inside = false;
    for (a, b) in polygon.edges() {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }

    if inside {
        PolygonLocation::Inside
    } else {
        PolygonLocation::Outside
    }
}

fn on_segment(p: WorldPoint, a: WorldPoint, b: WorldPoint) -> bool {
    let ab = b - a;
    let len = ab.length();
    if len <= BOUNDARY_TOLERANCE {
        return p.distance(&a) <= BOUNDARY_TOLERANCE;
    }
    // Perpendicular distance to the supporting line
    if (ab.cross(&(p - a)) / len).abs() > BOUNDARY_TOLERANCE {
        return false;
    }
    p.x >= a.x.min(b.x) - BOUNDARY_TOLERANCE
        && p.x <= a.x.max(b.x) + BOUNDARY_TOLERANCE
        && p.y >= a.y.min(b.y) - BOUNDARY_TOLERANCE
        && p.y <= a.y.max(b.y) + BOUNDARY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(1.0, 0.0),
            WorldPoint::new(1.0, 1.0),
            WorldPoint::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_unit_square_classification() {
        let square = unit_square();
        assert_eq!(
            point_in_polygon(WorldPoint::new(0.5, 0.5), &square),
            PolygonLocation::Inside
        );
        assert_eq!(
            point_in_polygon(WorldPoint::new(1.5, 0.5), &square),
            PolygonLocation::Outside
        );
        assert_eq!(
            point_in_polygon(WorldPoint::new(1.0, 0.5), &square),
            PolygonLocation::Boundary
        );
    }

    #[test]
    fn test_vertices_are_boundary() {
        let square = unit_square();
        for v in square.vertices() {
            assert_eq!(square.locate(*v), PolygonLocation::Boundary);
        }
    }

    #[test]
    fn test_outside_on_edge_extension() {
        // Collinear with the bottom edge but past its end
        let square = unit_square();
        assert_eq!(
            square.locate(WorldPoint::new(2.0, 0.0)),
            PolygonLocation::Outside
        );
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening upward
        let u = Polygon::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(3.0, 0.0),
            WorldPoint::new(3.0, 3.0),
            WorldPoint::new(2.0, 3.0),
            WorldPoint::new(2.0, 1.0),
            WorldPoint::new(1.0, 1.0),
            WorldPoint::new(1.0, 3.0),
            WorldPoint::new(0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(u.locate(WorldPoint::new(0.5, 2.0)), PolygonLocation::Inside);
        assert_eq!(u.locate(WorldPoint::new(1.5, 2.0)), PolygonLocation::Outside);
        assert_eq!(u.locate(WorldPoint::new(2.5, 2.0)), PolygonLocation::Inside);
        assert_eq!(u.locate(WorldPoint::new(1.5, 0.5)), PolygonLocation::Inside);
    }

    #[test]
    fn test_self_intersecting_does_not_panic() {
        let bowtie = Polygon::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(2.0, 2.0),
            WorldPoint::new(2.0, 0.0),
            WorldPoint::new(0.0, 2.0),
        ])
        .unwrap();
        assert_eq!(bowtie.locate(WorldPoint::new(1.0, 1.0)), PolygonLocation::Boundary);
        assert_eq!(bowtie.locate(WorldPoint::new(0.2, 1.0)), PolygonLocation::Inside);
        assert_eq!(bowtie.locate(WorldPoint::new(1.0, 0.2)), PolygonLocation::Outside);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let err = Polygon::new(vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(1.0, 0.0)])
            .unwrap_err();
        assert_eq!(err, PolygonError::TooFewVertices { vertices: 2 });

        let err = Polygon::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(f32::NAN, 0.0),
            WorldPoint::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, PolygonError::NonFiniteVertex { index: 1 });
    }

    #[test]
    fn test_bounding_box() {
        let triangle = Polygon::new(vec![
            WorldPoint::new(-1.0, 0.0),
            WorldPoint::new(4.0, 1.0),
            WorldPoint::new(2.0, 5.0),
        ])
        .unwrap();
        let bb = triangle.bounding_box();
        assert_eq!(bb.min, WorldPoint::new(-1.0, 0.0));
        assert_eq!(bb.max, WorldPoint::new(4.0, 5.0));
    }
}
