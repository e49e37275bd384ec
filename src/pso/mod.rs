//! Particle swarm optimization of sensor placements.
//!
//! A particle is a complete placement: one pose per sensor. The swarm
//! moves every particle toward its own best placement and toward the
//! swarm-wide best, one sweep at a time:
//!
//! ```text
//!   seed ──> evaluate ──> pick global best ─┐
//!                                           v
//!   ┌──> snapshot global best ──> update every particle (maybe parallel)
//!   │                                       │
//!   │                                       v
//!   └──── not done <── check termination <── rescan global best
//!                              │
//!                              v
//!                 Converged | Exhausted | Cancelled
//! ```
//!
//! Particles never read each other during a sweep, and the global best is
//! a shared immutable snapshot replaced once per sweep, so parallel and
//! sequential sweeps produce the same result.
//!
//! ## Quick Start
//!
//! ```rust
//! use drishti::core::WorldPoint;
//! use drishti::grid::{CellState, OccupancyGrid};
//! use drishti::pso::{optimize, CancelToken, PsoConfig};
//! use drishti::sensor::{CircularModel, MotionLimits};
//! use drishti::targets::extract_targets;
//!
//! let grid = OccupancyGrid::filled(6, 6, 1.0, WorldPoint::ZERO, CellState::Free).unwrap();
//! let targets = extract_targets(&grid, None);
//! let model = CircularModel::new(10.0, MotionLimits::uniform(1.0, 0.5));
//! let config = PsoConfig {
//!     swarm_size: 4,
//!     max_iterations: 10,
//!     ..Default::default()
//! }
//! .with_seed(1);
//!
//! let bounds = grid.world_bounds();
//! let result = optimize(targets, bounds, model, 1, config, &CancelToken::new()).unwrap();
//! assert_eq!(result.coverage, 1.0);
//! ```

mod cancel;
mod config;
mod coverage;
mod particle;
mod space;
mod state;
mod swarm;

pub use cancel::CancelToken;
pub use config::{PsoCoefficients, PsoConfig};
pub use coverage::{CoverageMatrix, CoverageScore, coverage_mask};
pub use particle::Particle;
pub use space::{SearchSpace, SeedRegion};
pub use state::{SwarmState, Termination};
pub use swarm::{GlobalBest, IterationRecord, Swarm};

use crate::error::Result;
use crate::geometry::Bounds;
use crate::result::PlacementResult;
use crate::sensor::SensorModel;
use crate::targets::TargetSet;

/// Seed a fresh swarm and run it to termination.
pub fn optimize<M: SensorModel>(
    targets: TargetSet,
    bounds: Bounds,
    model: M,
    sensor_count: usize,
    config: PsoConfig,
    cancel: &CancelToken,
) -> Result<PlacementResult> {
    let space = SearchSpace::new(targets, bounds, model, sensor_count);
    let mut swarm = Swarm::new(space, config)?;
    swarm.seed();
    swarm.run(cancel)
}
