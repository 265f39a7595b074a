//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`ReplayGuard`](crate::ReplayGuard).
///
/// Immutable after engine construction. Values outside the documented
/// ranges are rejected by [`GuardConfig::validate`] at construction time;
/// message processing itself never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Detection window `W`: rolling horizon for duplicate detection,
    /// fingerprint ownership, and the blacklist duration.
    pub window: Duration,

    /// Ring buffer slots `K` per source (≥ 1). Detection recall for
    /// same-source duplicates degrades gracefully once a source emits
    /// more than `K` messages inside the window.
    pub cache_slots: usize,

    /// Suspicion count `T` (≥ 1) at which a source is blacklisted.
    pub suspicion_threshold: u32,

    /// Probability `p` in [0, 1] of raising suspicion on a same-source
    /// duplicate. Legitimate retransmission produces occasional repeats;
    /// flagging only a fraction of them trades detection latency for
    /// false-positive resistance. Cross-source replays are always flagged.
    pub same_source_flag_probability: f64,

    /// When false the engine runs in observability-only mode: every
    /// message is accepted and recorded, no suspicion or blacklist logic
    /// runs.
    pub protection_enabled: bool,

    /// Suspicion policy after a blacklist expires.
    ///
    /// `false` replicates the escalating-distrust behavior: suspicion is
    /// never reset, so a once-blacklisted source re-triggers on its next
    /// flagged duplicate. `true` clears suspicion the first time the
    /// source is seen after expiry, giving it a clean slate.
    pub reset_suspicion_on_expiry: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            cache_slots: 8,
            suspicion_threshold: 5,
            same_source_flag_probability: 0.30,
            protection_enabled: true,
            reset_suspicion_on_expiry: false,
        }
    }
}

impl GuardConfig {
    /// Check all values against their documented ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        if self.cache_slots == 0 {
            return Err(ConfigError::ZeroCacheSlots);
        }
        if self.suspicion_threshold == 0 {
            return Err(ConfigError::ZeroSuspicionThreshold);
        }
        let p = self.same_source_flag_probability;
        if !(0.0..=1.0).contains(&p) || p.is_nan() {
            return Err(ConfigError::InvalidProbability { value: p });
        }
        Ok(())
    }

    /// Deterministic config for tests: flag every duplicate.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            same_source_flag_probability: 1.0,
            ..Self::default()
        }
    }
}
