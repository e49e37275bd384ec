//! Optimizer state machine states.

use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Global best reached the coverage threshold
    Converged,
    /// Iteration cap reached
    Exhausted,
    /// Cancelled between sweeps
    Cancelled,
}

impl Termination {
    /// Name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Termination::Converged => "Converged",
            Termination::Exhausted => "Exhausted",
            Termination::Cancelled => "Cancelled",
        }
    }
}

/// Swarm state
///
/// ```text
/// Uninitialized -> Seeded -> Iterating -> Converged | Exhausted | Cancelled
///                     \______________________^
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwarmState {
    /// Particles not yet placed
    Uninitialized,
    /// Particles placed and evaluated once
    Seeded,
    /// At least one sweep done
    Iterating,
    /// Stopped
    Finished(Termination),
}

impl SwarmState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwarmState::Finished(_))
    }

    /// Termination reason, if stopped.
    pub fn termination(&self) -> Option<Termination> {
        match self {
            SwarmState::Finished(t) => Some(*t),
            _ => None,
        }
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SwarmState::Uninitialized => "Uninitialized",
            SwarmState::Seeded => "Seeded",
            SwarmState::Iterating => "Iterating",
            SwarmState::Finished(t) => t.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!SwarmState::Uninitialized.is_terminal());
        assert!(!SwarmState::Seeded.is_terminal());
        assert!(!SwarmState::Iterating.is_terminal());
        assert!(SwarmState::Finished(Termination::Exhausted).is_terminal());
        assert_eq!(
            SwarmState::Finished(Termination::Cancelled).termination(),
            Some(Termination::Cancelled)
        );
        assert_eq!(SwarmState::Finished(Termination::Converged).name(), "Converged");
    }
}
