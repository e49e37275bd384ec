//! Read-only projection of a finished run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{SensorPose, WorldPoint};
use crate::io::ExportError;
use crate::pso::{CoverageScore, IterationRecord, Swarm, Termination, coverage_mask};
use crate::sensor::SensorModel;

/// Final placement and run diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// One pose per sensor
    pub poses: Vec<SensorPose>,
    /// Fraction of targets covered
    pub coverage: f32,
    /// Redundant observations per target
    pub multiple_coverage_index: f32,
    /// Targets covered
    pub covered_targets: usize,
    /// Observations beyond the first, summed over targets
    pub redundant_observations: usize,
    /// Targets in the run
    pub target_count: usize,
    /// Sweeps performed after seeding
    pub iterations: usize,
    /// Why the run stopped
    pub termination: Termination,
    /// Global best after seeding and after every sweep
    pub trace: Vec<IterationRecord>,
    /// Non-finite values recovered during the run
    pub anomalies: usize,
}

impl PlacementResult {
    /// Project the swarm's global best. Does not modify the swarm.
    pub fn from_swarm<M: SensorModel>(swarm: &Swarm<M>, termination: Termination) -> Self {
        let best = swarm.global_best();
        let score = swarm.best_score();
        Self {
            poses: best.map(|b| b.poses.clone()).unwrap_or_default(),
            coverage: score.coverage(),
            multiple_coverage_index: score.multiple_coverage_index(),
            covered_targets: score.covered,
            redundant_observations: score.redundant,
            target_count: score.targets,
            iterations: swarm.iteration(),
            termination,
            trace: swarm.trace().to_vec(),
            anomalies: swarm.anomalies(),
        }
    }

    /// Exact counts behind `coverage` and `multiple_coverage_index`.
    pub fn score(&self) -> CoverageScore {
        CoverageScore {
            covered: self.covered_targets,
            redundant: self.redundant_observations,
            targets: self.target_count,
        }
    }

    /// Which of `targets` the final poses cover.
    pub fn coverage_mask<M: SensorModel + ?Sized>(
        &self,
        targets: &[WorldPoint],
        model: &M,
    ) -> Vec<bool> {
        coverage_mask(targets, &self.poses, model)
    }

    /// Sensor field-of-view outlines for rendering.
    pub fn outlines<M: SensorModel + ?Sized>(&self, model: &M) -> Vec<Vec<WorldPoint>> {
        self.poses.iter().map(|p| model.outline(p)).collect()
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ExportError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write as YAML.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}
