//! Particle swarm configuration.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::config::defaults;

/// Configuration for the particle swarm optimizer.
///
/// Each sweep moves every sensor of every particle by
///
/// ```text
/// v' = c1 * v + c2 * r2 * (personal_best - x) + c3 * r3 * (global_best - x)
/// x' = x + clamp(v', -max, max)
/// ```
///
/// with `r2`, `r3` drawn uniformly in [0, 1) per axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsoConfig {
    /// Number of particles (candidate placements).
    #[serde(default = "defaults::swarm_size")]
    pub swarm_size: usize,

    /// Maximum number of sweeps after seeding. 0 returns the seeded best.
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,

    /// Stop once the global best covers at least this fraction of targets.
    #[serde(default = "defaults::coverage_threshold")]
    pub coverage_threshold: f32,

    /// Inertia weight c1.
    #[serde(default = "defaults::inertia_weight", alias = "c1")]
    pub inertia_weight: f32,

    /// Cognitive weight c2 (pull toward the particle's own best).
    #[serde(default = "defaults::cognitive_weight", alias = "c2")]
    pub cognitive_weight: f32,

    /// Social weight c3 (pull toward the global best).
    #[serde(default = "defaults::social_weight", alias = "c3")]
    pub social_weight: f32,

    /// RNG seed. None seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Update particles in parallel (rayon). Results do not depend on this.
    #[serde(default)]
    pub use_parallel: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: defaults::swarm_size(),
            max_iterations: defaults::max_iterations(),
            coverage_threshold: defaults::coverage_threshold(),
            inertia_weight: defaults::inertia_weight(),
            cognitive_weight: defaults::cognitive_weight(),
            social_weight: defaults::social_weight(),
            seed: None,
            use_parallel: false,
        }
    }
}

/// The three PSO weights, copied out of [`PsoConfig`] for the update loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PsoCoefficients {
    /// Inertia weight c1
    pub inertia: f32,
    /// Cognitive weight c2
    pub cognitive: f32,
    /// Social weight c3
    pub social: f32,
}

impl PsoConfig {
    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Weights used by the velocity update.
    pub fn coefficients(&self) -> PsoCoefficients {
        PsoCoefficients {
            inertia: self.inertia_weight,
            cognitive: self.cognitive_weight,
            social: self.social_weight,
        }
    }

    /// Swarm size, threshold and weights must be usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm_size == 0 {
            return Err(ConfigError::invalid("pso.swarm_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.coverage_threshold) {
            return Err(ConfigError::invalid(
                "pso.coverage_threshold",
                format!("{} outside [0, 1]", self.coverage_threshold),
            ));
        }
        let weights = [
            ("pso.inertia_weight", self.inertia_weight),
            ("pso.cognitive_weight", self.cognitive_weight),
            ("pso.social_weight", self.social_weight),
        ];
        for (field, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("{} is not finite", value)));
            }
        }
        Ok(())
    }
}
