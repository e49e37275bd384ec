//! Frozen per-run inputs shared by every particle.

use log::warn;
use rand::Rng;

use crate::core::WorldPoint;
use crate::geometry::Bounds;
use crate::sensor::SensorModel;
use crate::targets::TargetSet;

/// Where sensors are seeded.
#[derive(Clone, Debug, PartialEq)]
pub enum SeedRegion {
    /// Uniform choice among discrete points (perimeter cells or free cells)
    Points(Vec<WorldPoint>),
    /// Uniform position inside a rectangle
    Area(Bounds),
}

/// Targets, seed region, motion bounds and sensor model for one run.
///
/// Read-only while the swarm iterates, so particles can share it across
/// threads.
#[derive(Clone, Debug)]
pub struct SearchSpace<M> {
    targets: Vec<WorldPoint>,
    seeds: SeedRegion,
    bounds: Bounds,
    model: M,
    sensor_count: usize,
}

impl<M: SensorModel> SearchSpace<M> {
    /// Build the search space and pick the seed region.
    ///
    /// Seeds come from the perimeter when an area of interest produced
    /// one, else from the targets (free cells), else uniformly from
    /// `bounds`.
    pub fn new(target_set: TargetSet, bounds: Bounds, model: M, sensor_count: usize) -> Self {
        let TargetSet {
            targets,
            perimeter,
            polygon_applied,
            ..
        } = target_set;

        let seeds = if !perimeter.is_empty() {
            SeedRegion::Points(perimeter)
        } else {
            if polygon_applied {
                warn!("[Swarm] area of interest has no cells outside it, seeding on targets");
            }
            if !targets.is_empty() {
                SeedRegion::Points(targets.clone())
            } else {
                warn!("[Swarm] no targets to seed on, seeding uniformly over the map");
                SeedRegion::Area(bounds)
            }
        };

        Self {
            targets,
            seeds,
            bounds,
            model,
            sensor_count,
        }
    }

    /// Points that must be observed.
    #[inline]
    pub fn targets(&self) -> &[WorldPoint] {
        &self.targets
    }

    /// Seed region chosen at construction.
    #[inline]
    pub fn seeds(&self) -> &SeedRegion {
        &self.seeds
    }

    /// Region sensor positions are clamped to.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Visibility model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Sensors per particle.
    #[inline]
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// Draw a seed position.
    pub fn sample_seed<R: Rng>(&self, rng: &mut R) -> WorldPoint {
        match &self.seeds {
            SeedRegion::Points(points) if !points.is_empty() => {
                points[rng.random_range(0..points.len())]
            }
            SeedRegion::Area(area) if !area.is_empty() => WorldPoint::new(
                rng.random_range(area.min.x..=area.max.x),
                rng.random_range(area.min.y..=area.max.y),
            ),
            _ => WorldPoint::ZERO,
        }
    }

    /// Clamp a position into the motion bounds.
    #[inline]
    pub fn clamp(&self, point: WorldPoint) -> WorldPoint {
        if self.bounds.is_empty() {
            point
        } else {
            self.bounds.clamp(point)
        }
    }
}
