//! One candidate placement.

use log::warn;
use rand::Rng;
use rand::rngs::StdRng;

use super::config::PsoCoefficients;
use super::coverage::{CoverageMatrix, CoverageScore};
use super::space::SearchSpace;
use crate::core::math::{TWO_PI, angle_diff, clamp_symmetric, wrap_heading};
use crate::core::{SensorPose, SensorVelocity, WorldPoint};
use crate::sensor::SensorModel;

/// A particle: current poses and velocities of every sensor, plus the
/// particle's own best placement so far.
///
/// Each particle owns its random number generator so that sweeps produce
/// the same trajectories whether particles are updated in sequence or in
/// parallel.
#[derive(Clone, Debug)]
pub struct Particle {
    id: usize,
    poses: Vec<SensorPose>,
    velocities: Vec<SensorVelocity>,
    best_poses: Vec<SensorPose>,
    score: CoverageScore,
    best_score: CoverageScore,
    matrix: CoverageMatrix,
    evaluations: usize,
    anomalies: usize,
    rng: StdRng,
}

impl Particle {
    /// Create a particle with every sensor at the origin, at rest.
    pub fn new(id: usize, sensor_count: usize, target_count: usize, rng: StdRng) -> Self {
        let poses = vec![SensorPose::default(); sensor_count];
        Self {
            id,
            best_poses: poses.clone(),
            poses,
            velocities: vec![SensorVelocity::ZERO; sensor_count],
            score: CoverageScore::default(),
            best_score: CoverageScore::default(),
            matrix: CoverageMatrix::new(target_count, sensor_count),
            evaluations: 0,
            anomalies: 0,
            rng,
        }
    }

    /// Slot index in the swarm.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current sensor poses.
    #[inline]
    pub fn poses(&self) -> &[SensorPose] {
        &self.poses
    }

    /// Current sensor velocities.
    #[inline]
    pub fn velocities(&self) -> &[SensorVelocity] {
        &self.velocities
    }

    /// Poses of the particle's best placement so far.
    #[inline]
    pub fn best_poses(&self) -> &[SensorPose] {
        &self.best_poses
    }

    /// Score of the current poses.
    #[inline]
    pub fn score(&self) -> CoverageScore {
        self.score
    }

    /// Score of the personal best.
    #[inline]
    pub fn best_score(&self) -> CoverageScore {
        self.best_score
    }

    /// Coverage of the current poses.
    #[inline]
    pub fn coverage(&self) -> f32 {
        self.score.coverage()
    }

    /// Coverage of the personal best.
    #[inline]
    pub fn best_coverage(&self) -> f32 {
        self.best_score.coverage()
    }

    /// Multiple coverage index of the current poses.
    #[inline]
    pub fn multiple_coverage_index(&self) -> f32 {
        self.score.multiple_coverage_index()
    }

    /// Visibility matrix of the current poses.
    #[inline]
    pub fn coverage_matrix(&self) -> &CoverageMatrix {
        &self.matrix
    }

    /// Non-finite values recovered so far.
    #[inline]
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Place every sensor on a random seed point with a random heading.
    pub fn place_sensors_randomly_on_perimeter<M: SensorModel>(&mut self, space: &SearchSpace<M>) {
        for pose in &mut self.poses {
            let position = space.sample_seed(&mut self.rng);
            let yaw = self.rng.random_range(0.0..TWO_PI);
            *pose = SensorPose::at(position, yaw);
        }
    }

    /// Draw every velocity component uniformly in [-max, max].
    pub fn initialize_random_sensor_velocities<M: SensorModel>(&mut self, space: &SearchSpace<M>) {
        let limits = *space.model().limits();
        let (vx, vy, wz) = (
            limits.max_linear_x(),
            limits.max_linear_y(),
            limits.max_angular_z(),
        );
        for velocity in &mut self.velocities {
            *velocity = SensorVelocity::new(
                self.rng.random_range(-vx..=vx),
                self.rng.random_range(-vy..=vy),
                self.rng.random_range(-wz..=wz),
            );
        }
    }

    /// Recompute the visibility matrix for the current poses.
    pub fn calc_coverage_matrix<M: SensorModel>(&mut self, space: &SearchSpace<M>) {
        self.matrix.fill(space.targets(), &self.poses, space.model());
    }

    /// Score the matrix and update the personal best.
    ///
    /// The personal best moves only when strictly more targets are covered.
    /// The first evaluation always sets it.
    pub fn calc_coverage(&mut self) {
        self.score = self.matrix.score();
        if self.evaluations == 0 || self.score.covered > self.best_score.covered {
            self.best_score = self.score;
            self.best_poses.clone_from(&self.poses);
        }
        self.evaluations += 1;
    }

    /// Matrix then score.
    pub fn evaluate<M: SensorModel>(&mut self, space: &SearchSpace<M>) {
        self.calc_coverage_matrix(space);
        self.calc_coverage();
    }

    /// One PSO step toward the personal and global bests, then re-evaluate.
    ///
    /// `global_best` is indexed by sensor; a missing entry pulls toward the
    /// current pose, i.e. not at all.
    pub fn update_particle<M: SensorModel>(
        &mut self,
        global_best: &[SensorPose],
        coefficients: &PsoCoefficients,
        space: &SearchSpace<M>,
    ) {
        let limits = *space.model().limits();

        for i in 0..self.poses.len() {
            let current = self.poses[i];
            let personal = self.best_poses[i];
            let global = global_best.get(i).copied().unwrap_or(current);
            let v = self.velocities[i];

            let r2: [f32; 3] = [self.rng.random(), self.rng.random(), self.rng.random()];
            let r3: [f32; 3] = [self.rng.random(), self.rng.random(), self.rng.random()];

            let deltas = [
                (v.linear_x, personal.x - current.x, global.x - current.x, limits.max_linear_x()),
                (v.linear_y, personal.y - current.y, global.y - current.y, limits.max_linear_y()),
                (
                    v.angular_z,
                    angle_diff(current.yaw, personal.yaw),
                    angle_diff(current.yaw, global.yaw),
                    limits.max_angular_z(),
                ),
            ];

            let mut next = [0.0_f32; 3];
            for (axis, (velocity, to_personal, to_global, max)) in deltas.into_iter().enumerate() {
                let raw = coefficients.inertia * velocity
                    + coefficients.cognitive * r2[axis] * to_personal
                    + coefficients.social * r3[axis] * to_global;
                next[axis] = if raw.is_finite() {
                    clamp_symmetric(raw, max)
                } else {
                    self.record_anomaly(i, "velocity");
                    0.0
                };
            }
            self.velocities[i] = SensorVelocity::new(next[0], next[1], next[2]);

            let mut x = current.x + next[0];
            let mut y = current.y + next[1];
            if !(x.is_finite() && y.is_finite()) {
                self.record_anomaly(i, "position");
                x = current.x;
                y = current.y;
            }
            let position = space.clamp(WorldPoint::new(x, y));
            let yaw = wrap_heading(current.yaw + next[2]);
            self.poses[i] = SensorPose::new(position.x, position.y, yaw);
        }

        self.evaluate(space);
    }

    fn record_anomaly(&mut self, sensor: usize, what: &str) {
        self.anomalies += 1;
        warn!(
            "[Particle {}] non-finite {} for sensor {}, reset",
            self.id, what, sensor
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::sensor::{CircularModel, MotionLimits};
    use crate::targets::TargetSet;
    use rand::SeedableRng;

    fn space(sensors: usize, limits: MotionLimits) -> SearchSpace<CircularModel> {
        let targets: Vec<WorldPoint> = (0..10)
            .flat_map(|y| (0..10).map(move |x| WorldPoint::new(x as f32 + 0.5, y as f32 + 0.5)))
            .collect();
        let set = TargetSet {
            targets,
            ..Default::default()
        };
        let bounds = Bounds::new(WorldPoint::ZERO, WorldPoint::new(10.0, 10.0));
        SearchSpace::new(set, bounds, CircularModel::new(1.5, limits), sensors)
    }

    fn seeded(space: &SearchSpace<CircularModel>, seed: u64) -> Particle {
        let mut p = Particle::new(
            0,
            space.sensor_count(),
            space.targets().len(),
            StdRng::seed_from_u64(seed),
        );
        p.place_sensors_randomly_on_perimeter(space);
        p.initialize_random_sensor_velocities(space);
        p.evaluate(space);
        p
    }

    #[test]
    fn test_seeding_respects_limits() {
        let limits = MotionLimits {
            linear: [0.3, 0.2, 1.0],
            angular: [1.0, 1.0, 0.1],
        };
        let s = space(4, limits);
        let p = seeded(&s, 7);
        for (pose, v) in p.poses().iter().zip(p.velocities()) {
            assert!(s.bounds().contains(pose.position()));
            assert!((0.0..TWO_PI).contains(&pose.yaw));
            assert!(v.linear_x.abs() <= 0.3);
            assert!(v.linear_y.abs() <= 0.2);
            assert!(v.angular_z.abs() <= 0.1);
        }
        assert_eq!(p.best_poses(), p.poses());
        assert_eq!(p.best_score(), p.score());
    }

    #[test]
    fn test_update_clamps_velocity() {
        let limits = MotionLimits::uniform(0.25, 0.05);
        let s = space(3, limits);
        let mut p = seeded(&s, 11);
        // Far-away global best and huge weights force every axis to the limit
        let global = vec![SensorPose::new(100.0, -100.0, 3.0); 3];
        let coefficients = PsoCoefficients {
            inertia: 50.0,
            cognitive: 50.0,
            social: 50.0,
        };
        for _ in 0..20 {
            p.update_particle(&global, &coefficients, &s);
            for v in p.velocities() {
                assert!(v.linear_x.abs() <= 0.25);
                assert!(v.linear_y.abs() <= 0.25);
                assert!(v.angular_z.abs() <= 0.05);
            }
            for pose in p.poses() {
                assert!(s.bounds().contains(pose.position()));
                assert!((0.0..TWO_PI).contains(&pose.yaw));
            }
        }
        assert_eq!(p.anomalies(), 0);
    }

    #[test]
    fn test_personal_best_never_regresses() {
        let s = space(2, MotionLimits::uniform(1.0, 0.5));
        let mut p = seeded(&s, 3);
        let coefficients = PsoCoefficients {
            inertia: 0.729,
            cognitive: 1.49445,
            social: 1.49445,
        };
        let global = p.poses().to_vec();
        let mut best = p.best_score().covered;
        for _ in 0..30 {
            p.update_particle(&global, &coefficients, &s);
            assert!(p.best_score().covered >= best);
            assert!(p.best_score().covered >= p.score().covered);
            best = p.best_score().covered;
        }
    }

    #[test]
    fn test_non_finite_weights_are_recovered() {
        let s = space(2, MotionLimits::uniform(1.0, 0.5));
        let mut p = seeded(&s, 5);
        let before = p.poses().to_vec();
        let coefficients = PsoCoefficients {
            inertia: f32::NAN,
            cognitive: 1.0,
            social: 1.0,
        };
        p.update_particle(&before, &coefficients, &s);

        assert_eq!(p.anomalies(), 6);
        for (v, (old, new)) in p.velocities().iter().zip(before.iter().zip(p.poses())) {
            assert_eq!(*v, SensorVelocity::ZERO);
            assert_eq!(old, new);
        }
    }

    #[test]
    fn test_zero_sensors_scores_zero() {
        let s = space(0, MotionLimits::uniform(1.0, 0.5));
        let mut p = seeded(&s, 1);
        assert_eq!(p.coverage(), 0.0);
        let coefficients = PsoCoefficients {
            inertia: 1.0,
            cognitive: 1.0,
            social: 1.0,
        };
        p.update_particle(&[], &coefficients, &s);
        assert_eq!(p.coverage(), 0.0);
        assert_eq!(p.multiple_coverage_index(), 0.0);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let s = space(3, MotionLimits::uniform(1.0, 0.5));
        let mut a = seeded(&s, 42);
        let mut b = seeded(&s, 42);
        let global = vec![SensorPose::new(5.0, 5.0, 1.0); 3];
        let coefficients = PsoCoefficients {
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
        };
        for _ in 0..10 {
            a.update_particle(&global, &coefficients, &s);
            b.update_particle(&global, &coefficients, &s);
            assert_eq!(a.poses(), b.poses());
            assert_eq!(a.velocities(), b.velocities());
        }
    }
}
