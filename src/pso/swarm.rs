//! Particle population and the optimization loop.

use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::cancel::CancelToken;
use super::config::PsoConfig;
use super::coverage::CoverageScore;
use super::particle::Particle;
use super::space::SearchSpace;
use super::state::{SwarmState, Termination};
use crate::config::ConfigError;
use crate::core::SensorPose;
use crate::error::{PlacementError, Result};
use crate::result::PlacementResult;
use crate::sensor::SensorModel;

/// Snapshot of the best placement found by any particle.
///
/// Never updated in place: a better placement replaces the whole value,
/// so particles reading one snapshot during a sweep all see the same best.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalBest {
    /// Sensor poses of the best placement
    pub poses: Vec<SensorPose>,
    /// Its score
    pub score: CoverageScore,
    /// Particle it was copied from
    pub particle: usize,
    /// Sweep it was found in (0 = seeding)
    pub iteration: usize,
}

/// Global best after one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Sweep number (0 = seeding)
    pub iteration: usize,
    /// Global best coverage
    pub best_coverage: f32,
    /// Global best multiple coverage index
    pub multiple_coverage_index: f32,
}

/// Particle swarm over a fixed [`SearchSpace`].
pub struct Swarm<M: SensorModel> {
    space: SearchSpace<M>,
    config: PsoConfig,
    particles: Vec<Particle>,
    global_best: Option<Arc<GlobalBest>>,
    state: SwarmState,
    iteration: usize,
    trace: Vec<IterationRecord>,
}

impl<M: SensorModel> Swarm<M> {
    /// Create an unseeded swarm. Optimizer and sensor settings are validated
    /// here so a bad limit never reaches the sampling code.
    pub fn new(
        space: SearchSpace<M>,
        config: PsoConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        space.model().validate()?;
        Ok(Self {
            space,
            config,
            particles: Vec::new(),
            global_best: None,
            state: SwarmState::Uninitialized,
            iteration: 0,
            trace: Vec::new(),
        })
    }

    /// Seed from `config.seed`, or from the OS when unset.
    pub fn seed(&mut self) {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.seed_with_rng(&mut rng);
    }

    /// Place and evaluate every particle, then pick the initial global best.
    ///
    /// Each particle gets its own generator derived from `rng`. Re-seeding
    /// discards any previous run.
    pub fn seed_with_rng<R: Rng>(&mut self, rng: &mut R) {
        let sensors = self.space.sensor_count();
        let targets = self.space.targets().len();

        self.particles = (0..self.config.swarm_size)
            .map(|id| Particle::new(id, sensors, targets, StdRng::seed_from_u64(rng.random())))
            .collect();

        let space = &self.space;
        for particle in &mut self.particles {
            particle.place_sensors_randomly_on_perimeter(space);
            particle.initialize_random_sensor_velocities(space);
            particle.evaluate(space);
        }

        self.iteration = 0;
        self.global_best = None;
        self.trace.clear();
        self.update_global_best();
        self.record_iteration();
        self.state = SwarmState::Seeded;

        info!(
            "[Swarm] seeded {} particles x {} sensors over {} targets, best coverage {:.4}",
            self.particles.len(),
            sensors,
            targets,
            self.best_score().coverage()
        );
    }

    /// Run until converged, exhausted or cancelled.
    ///
    /// Returns the projection of the global best. Calling this on a stopped
    /// swarm returns the same result again without iterating.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<PlacementResult> {
        if self.state == SwarmState::Uninitialized {
            return Err(PlacementError::NotSeeded);
        }

        loop {
            if let Some(termination) = self.state.termination() {
                return Ok(PlacementResult::from_swarm(self, termination));
            }
            if let Some(termination) = self.check_termination(cancel) {
                self.state = SwarmState::Finished(termination);
                info!(
                    "[Swarm] {} after {} iterations, coverage {:.4}, multiple coverage index {:.4}",
                    termination.name(),
                    self.iteration,
                    self.best_score().coverage(),
                    self.best_score().multiple_coverage_index()
                );
                continue;
            }
            self.step()?;
        }
    }

    /// Perform exactly one sweep: move every particle against the same
    /// global-best snapshot, then rescan for a new global best.
    ///
    /// A stopped swarm is left untouched.
    pub fn step(&mut self) -> Result<()> {
        let snapshot = match (&self.state, &self.global_best) {
            (SwarmState::Uninitialized, _) | (_, None) => return Err(PlacementError::NotSeeded),
            (SwarmState::Finished(_), _) => return Ok(()),
            (_, Some(best)) => Arc::clone(best),
        };
        let coefficients = self.config.coefficients();
        let space = &self.space;

        if self.config.use_parallel {
            self.particles
                .par_iter_mut()
                .for_each(|p| p.update_particle(&snapshot.poses, &coefficients, space));
        } else {
            for p in &mut self.particles {
                p.update_particle(&snapshot.poses, &coefficients, space);
            }
        }

        self.iteration += 1;
        self.update_global_best();
        self.record_iteration();
        self.state = SwarmState::Iterating;

        debug!(
            "iteration: {} with coverage: {:.4}",
            self.iteration,
            self.best_score().coverage()
        );
        Ok(())
    }

    fn check_termination(&self, cancel: &CancelToken) -> Option<Termination> {
        let best = self.best_score();
        if best.targets > 0 && best.coverage() >= self.config.coverage_threshold {
            Some(Termination::Converged)
        } else if cancel.is_cancelled() {
            Some(Termination::Cancelled)
        } else if self.iteration >= self.config.max_iterations {
            Some(Termination::Exhausted)
        } else {
            None
        }
    }

    /// Scan particles in order; replace the snapshot once if any beat it.
    fn update_global_best(&mut self) {
        let mut reference = self.global_best.as_ref().map(|b| b.score);
        let mut winner = None;
        for (i, particle) in self.particles.iter().enumerate() {
            let score = particle.score();
            if reference.is_none_or(|best| score.is_better_than(&best)) {
                reference = Some(score);
                winner = Some(i);
            }
        }

        if let Some(i) = winner {
            let particle = &self.particles[i];
            self.global_best = Some(Arc::new(GlobalBest {
                poses: particle.poses().to_vec(),
                score: particle.score(),
                particle: i,
                iteration: self.iteration,
            }));
        }
    }

    fn record_iteration(&mut self) {
        let best = self.best_score();
        self.trace.push(IterationRecord {
            iteration: self.iteration,
            best_coverage: best.coverage(),
            multiple_coverage_index: best.multiple_coverage_index(),
        });
    }

    /// Current state.
    pub fn state(&self) -> SwarmState {
        self.state
    }

    /// Sweeps performed since seeding.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current global best snapshot.
    pub fn global_best(&self) -> Option<&GlobalBest> {
        self.global_best.as_deref()
    }

    /// Score of the global best (zero before seeding).
    pub fn best_score(&self) -> CoverageScore {
        self.global_best
            .as_ref()
            .map(|b| b.score)
            .unwrap_or_default()
    }

    /// Particles in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Global best after seeding and after every sweep.
    pub fn trace(&self) -> &[IterationRecord] {
        &self.trace
    }

    /// Frozen run inputs.
    pub fn space(&self) -> &SearchSpace<M> {
        &self.space
    }

    /// Optimizer settings.
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Non-finite values recovered across all particles.
    pub fn anomalies(&self) -> usize {
        self.particles.iter().map(Particle::anomalies).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;
    use crate::geometry::Bounds;
    use crate::sensor::{CircularModel, MotionLimits};
    use crate::targets::TargetSet;

    fn space(range: f32, sensors: usize) -> SearchSpace<CircularModel> {
        let targets: Vec<WorldPoint> = (0..8)
            .flat_map(|y| (0..8).map(move |x| WorldPoint::new(x as f32 + 0.5, y as f32 + 0.5)))
            .collect();
        let set = TargetSet {
            targets,
            ..Default::default()
        };
        let bounds = Bounds::new(WorldPoint::ZERO, WorldPoint::new(8.0, 8.0));
        let model = CircularModel::new(range, MotionLimits::uniform(1.0, 0.5));
        SearchSpace::new(set, bounds, model, sensors)
    }

    fn config(max_iterations: usize, threshold: f32) -> PsoConfig {
        PsoConfig {
            swarm_size: 6,
            max_iterations,
            coverage_threshold: threshold,
            ..PsoConfig::default()
        }
        .with_seed(9)
    }

    #[test]
    fn test_run_requires_seeding() {
        let mut swarm = Swarm::new(space(1.0, 2), config(5, 1.0)).unwrap();
        assert_eq!(swarm.state(), SwarmState::Uninitialized);
        assert!(matches!(
            swarm.run(&CancelToken::new()),
            Err(PlacementError::NotSeeded)
        ));
        assert!(matches!(swarm.step(), Err(PlacementError::NotSeeded)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = config(5, 1.0);
        cfg.swarm_size = 0;
        assert!(Swarm::new(space(1.0, 2), cfg).is_err());
    }

    #[test]
    fn test_invalid_sensor_limits_rejected() {
        let space_with = |limits: MotionLimits| {
            let targets = TargetSet {
                targets: vec![WorldPoint::new(1.0, 1.0)],
                ..Default::default()
            };
            let bounds = Bounds::new(WorldPoint::ZERO, WorldPoint::new(2.0, 2.0));
            SearchSpace::new(targets, bounds, CircularModel::new(1.0, limits), 1)
        };

        let err = Swarm::new(space_with(MotionLimits::uniform(-1.0, 0.5)), config(5, 1.0))
            .err()
            .unwrap();
        assert_eq!(err.field, "sensor.max_linear_velocity");

        let mut limits = MotionLimits::uniform(1.0, 0.5);
        limits.angular[2] = f32::NAN;
        assert!(Swarm::new(space_with(limits), config(5, 1.0)).is_err());
    }

    #[test]
    fn test_seeding_picks_best_particle() {
        let mut swarm = Swarm::new(space(1.5, 2), config(5, 1.0)).unwrap();
        swarm.seed();
        assert_eq!(swarm.state(), SwarmState::Seeded);
        assert_eq!(swarm.particles().len(), 6);

        let best = swarm.global_best().unwrap();
        for p in swarm.particles() {
            assert!(!p.score().is_better_than(&best.score));
        }
        assert_eq!(best.poses, swarm.particles()[best.particle].poses());
        assert_eq!(swarm.trace().len(), 1);
        assert_eq!(swarm.trace()[0].iteration, 0);
    }

    #[test]
    fn test_zero_iterations_returns_seeded_best() {
        let mut swarm = Swarm::new(space(1.0, 2), config(0, 1.0)).unwrap();
        swarm.seed();
        let seeded = swarm.best_score();
        let result = swarm.run(&CancelToken::new()).unwrap();
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.covered_targets, seeded.covered);
    }

    #[test]
    fn test_global_best_is_monotone() {
        let mut swarm = Swarm::new(space(1.2, 3), config(40, 1.0)).unwrap();
        swarm.seed();
        let result = swarm.run(&CancelToken::new()).unwrap();
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.trace.len(), 41);
        for pair in result.trace.windows(2) {
            assert!(pair[1].best_coverage >= pair[0].best_coverage);
            assert_eq!(pair[1].iteration, pair[0].iteration + 1);
        }
    }

    #[test]
    fn test_cancelled_before_first_sweep() {
        let mut swarm = Swarm::new(space(1.0, 2), config(100, 1.0)).unwrap();
        swarm.seed();
        let token = CancelToken::new();
        token.cancel();
        let result = swarm.run(&token).unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.poses.len(), 2);
        assert_eq!(swarm.state(), SwarmState::Finished(Termination::Cancelled));
    }

    #[test]
    fn test_rerun_of_finished_swarm_is_stable() {
        let mut swarm = Swarm::new(space(1.0, 2), config(3, 1.0)).unwrap();
        swarm.seed();
        let first = swarm.run(&CancelToken::new()).unwrap();
        let second = swarm.run(&CancelToken::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let mut swarm = Swarm::new(space(1.0, 2), config(3, 1.0)).unwrap();
        swarm.seed();
        let first = swarm.run(&CancelToken::new()).unwrap();

        swarm.step().unwrap();
        assert_eq!(swarm.iteration(), 3);
        assert_eq!(swarm.state(), SwarmState::Finished(Termination::Exhausted));
        assert_eq!(swarm.run(&CancelToken::new()).unwrap(), first);
    }
}
