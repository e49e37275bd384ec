//! Configuration errors.

use thiserror::Error;

/// Config load error
#[derive(Error, Debug, Clone)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Semantic validation failure of a loaded configuration.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {reason}")]
pub struct ConfigError {
    /// Dotted path of the offending field (e.g. `pso.swarm_size`)
    pub field: &'static str,
    /// What is wrong with it
    pub reason: String,
}

impl ConfigError {
    /// Build a validation error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
