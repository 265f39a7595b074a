//! Simulation configuration.

use std::time::Duration;

use drm_engine::GuardConfig;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Configuration for one simulation run.
///
/// Defaults reproduce the reference scenario: 20 nodes, the root beaconing
/// every 5 s from t = 1 s, the attacker replaying at 5 msg/s from t = 12 s,
/// 60 s of simulated time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of nodes. Node 0 is the root, the last node the attacker.
    pub nodes: usize,

    /// Simulated duration.
    pub sim_time: Duration,

    /// First root beacon instant.
    pub beacon_start: Duration,

    /// Interval between root beacons.
    pub beacon_interval: Duration,

    /// Instant the attacker starts replaying.
    pub attack_start: Duration,

    /// Replays per simulated second.
    pub attacker_rate: f64,

    /// Fixed beacon payload when true; fresh random payloads otherwise.
    ///
    /// With fixed payloads every beacon repeat is itself a same-source
    /// duplicate, so even the legitimate root accumulates suspicion; the
    /// worst case for false positives.
    pub deterministic_beacons: bool,

    /// Attacker XORs a random byte of each replay with small noise.
    pub perturb_replays: bool,

    /// Seed for all randomness: payloads, perturbation, per-node samplers.
    pub seed: u64,

    /// Engine configuration shared by every node.
    pub guard: GuardConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            nodes: 20,
            sim_time: Duration::from_secs(60),
            beacon_start: Duration::from_secs(1),
            beacon_interval: Duration::from_secs(5),
            attack_start: Duration::from_secs(12),
            attacker_rate: 5.0,
            deterministic_beacons: true,
            perturb_replays: false,
            seed: 42,
            guard: GuardConfig::default(),
        }
    }
}

impl SimConfig {
    /// Check simulation parameters and the embedded guard config.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.nodes < 2 {
            return Err(SimError::TooFewNodes(self.nodes));
        }
        // Node addresses live in one /24.
        if self.nodes > 254 {
            return Err(SimError::TooManyNodes(self.nodes));
        }
        if self.sim_time.is_zero() {
            return Err(SimError::ZeroSimTime);
        }
        if self.beacon_interval.is_zero() {
            return Err(SimError::ZeroBeaconInterval);
        }
        if !self.attacker_rate.is_finite() || self.attacker_rate <= 0.0 {
            return Err(SimError::InvalidAttackerRate(self.attacker_rate));
        }
        self.guard.validate()?;
        Ok(())
    }
}
