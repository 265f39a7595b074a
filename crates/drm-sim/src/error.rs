//! Simulation error types.

use drm_engine::ConfigError;
use thiserror::Error;

/// Errors raised while validating or constructing a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("simulation needs at least 2 nodes (root + attacker), got {0}")]
    TooFewNodes(usize),

    #[error("simulation supports at most 254 nodes, got {0}")]
    TooManyNodes(usize),

    #[error("simulation time must be non-zero")]
    ZeroSimTime,

    #[error("beacon interval must be non-zero")]
    ZeroBeaconInterval,

    #[error("attacker rate {0} must be positive and finite")]
    InvalidAttackerRate(f64),

    #[error("invalid guard config: {0}")]
    Guard(#[from] ConfigError),
}
