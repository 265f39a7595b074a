//! Error types for the replay mitigation engine.
//!
//! Message processing itself is total: every input yields a well-defined
//! verdict, and `Drop` is a first-class outcome rather than an error. The
//! only failure surface is configuration validation at construction time.

use thiserror::Error;

/// Errors raised when a [`GuardConfig`](crate::GuardConfig) is rejected
/// at engine construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("detection window must be non-zero")]
    ZeroWindow,

    #[error("fingerprint cache needs at least one slot")]
    ZeroCacheSlots,

    #[error("suspicion threshold must be at least 1")]
    ZeroSuspicionThreshold,

    #[error("same-source flag probability {value} outside [0, 1]")]
    InvalidProbability { value: f64 },
}
