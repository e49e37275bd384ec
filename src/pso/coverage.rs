//! Coverage matrix and scoring.
//!
//! The matrix records, for every (target, sensor) pair, whether the sensor
//! observes the target:
//!
//! ```text
//!              sensor 0  sensor 1  sensor 2
//!   target 0      1         0         1      -> covered, 1 redundant
//!   target 1      0         0         0      -> uncovered
//!   target 2      0         1         0      -> covered
//! ```
//!
//! coverage = covered / targets, multiple coverage index = redundant / targets.

use serde::{Deserialize, Serialize};

use crate::core::{SensorPose, WorldPoint};
use crate::sensor::SensorModel;

/// Row-major (target x sensor) visibility matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageMatrix {
    targets: usize,
    sensors: usize,
    cells: Vec<bool>,
}

impl CoverageMatrix {
    /// All-false matrix.
    pub fn new(targets: usize, sensors: usize) -> Self {
        Self {
            targets,
            sensors,
            cells: vec![false; targets * sensors],
        }
    }

    /// Recompute every entry for the given poses.
    ///
    /// The matrix is resized if the shape changed.
    pub fn fill<M: SensorModel + ?Sized>(
        &mut self,
        targets: &[WorldPoint],
        poses: &[SensorPose],
        model: &M,
    ) {
        self.targets = targets.len();
        self.sensors = poses.len();
        self.cells.clear();
        self.cells.reserve(self.targets * self.sensors);
        for target in targets {
            self.cells
                .extend(poses.iter().map(|pose| model.covers(pose, *target)));
        }
    }

    /// Number of target rows.
    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets
    }

    /// Number of sensor columns.
    #[inline]
    pub fn sensor_count(&self) -> usize {
        self.sensors
    }

    /// Whether `sensor` observes `target`.
    #[inline]
    pub fn get(&self, target: usize, sensor: usize) -> bool {
        target < self.targets && sensor < self.sensors && self.cells[target * self.sensors + sensor]
    }

    /// Number of sensors observing `target`.
    #[inline]
    pub fn observers(&self, target: usize) -> usize {
        if self.sensors == 0 {
            return 0;
        }
        self.cells[target * self.sensors..(target + 1) * self.sensors]
            .iter()
            .filter(|&&seen| seen)
            .count()
    }

    /// Covered / redundant counts over all targets.
    pub fn score(&self) -> CoverageScore {
        let mut covered = 0;
        let mut redundant = 0;
        for t in 0..self.targets {
            let n = self.observers(t);
            if n > 0 {
                covered += 1;
                redundant += n - 1;
            }
        }
        CoverageScore {
            covered,
            redundant,
            targets: self.targets,
        }
    }

    /// Per-target covered flag.
    pub fn mask(&self) -> Vec<bool> {
        (0..self.targets).map(|t| self.observers(t) > 0).collect()
    }
}

/// Exact coverage counts for one placement.
///
/// Comparisons use the integer numerators, so ties are exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageScore {
    /// Targets seen by at least one sensor
    pub covered: usize,
    /// Observations beyond the first, summed over targets
    pub redundant: usize,
    /// Total number of targets
    pub targets: usize,
}

impl CoverageScore {
    /// Fraction of targets covered, 0 when there are no targets.
    #[inline]
    pub fn coverage(&self) -> f32 {
        if self.targets == 0 {
            0.0
        } else {
            self.covered as f32 / self.targets as f32
        }
    }

    /// Redundant observations per target, 0 when there are no targets.
    #[inline]
    pub fn multiple_coverage_index(&self) -> f32 {
        if self.targets == 0 {
            0.0
        } else {
            self.redundant as f32 / self.targets as f32
        }
    }

    /// Strictly better: more targets covered, or as many with less redundancy.
    #[inline]
    pub fn is_better_than(&self, other: &CoverageScore) -> bool {
        self.covered > other.covered
            || (self.covered == other.covered && self.redundant < other.redundant)
    }
}

/// Per-target covered flags for a set of poses.
pub fn coverage_mask<M: SensorModel + ?Sized>(
    targets: &[WorldPoint],
    poses: &[SensorPose],
    model: &M,
) -> Vec<bool> {
    targets
        .iter()
        .map(|t| poses.iter().any(|p| model.covers(p, *t)))
        .collect()
}
