//! Simulated actors: guarded nodes, the root beacon source, the attacker.

use drm_engine::{ReplayGuard, SourceId, Timestamp, Verdict};
use rand::rngs::StdRng;
use rand::Rng;

/// The fixed beacon payload used in deterministic mode.
pub const DETERMINISTIC_BEACON: [u8; 8] = [0xAA, 0xBB, 0xCC, 0xDD, 0x11, 0x22, 0x33, 0x44];

/// One network node: an address plus its own independent guard instance.
#[derive(Debug)]
pub struct SimNode {
    source: SourceId,
    guard: ReplayGuard,
}

impl SimNode {
    /// Create a node.
    pub fn new(source: SourceId, guard: ReplayGuard) -> Self {
        Self { source, guard }
    }

    /// The node's own address.
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Deliver an overheard broadcast to this node's guard.
    pub fn on_receive(&mut self, from: SourceId, payload: &[u8], now: Timestamp) -> Verdict {
        self.guard.on_message(from, payload, now)
    }

    /// The node's guard, for telemetry aggregation.
    pub fn guard(&self) -> &ReplayGuard {
        &self.guard
    }
}

/// Generates the root's periodic beacon payloads.
#[derive(Debug)]
pub struct RootBeacon {
    deterministic: bool,
    sends: u64,
}

impl RootBeacon {
    /// Create a beacon source.
    pub fn new(deterministic: bool) -> Self {
        Self {
            deterministic,
            sends: 0,
        }
    }

    /// Produce the next beacon payload.
    pub fn next_payload(&mut self, rng: &mut StdRng) -> [u8; 8] {
        self.sends += 1;
        if self.deterministic {
            DETERMINISTIC_BEACON
        } else {
            let mut payload = [0u8; 8];
            rng.fill(&mut payload);
            payload
        }
    }

    /// Beacons emitted so far.
    pub fn sends(&self) -> u64 {
        self.sends
    }
}

/// Replays the most recently overheard beacon.
#[derive(Debug)]
pub struct ReplayAttacker {
    captured: Option<Vec<u8>>,
    perturb: bool,
    replays: u64,
}

impl ReplayAttacker {
    /// Create an attacker.
    pub fn new(perturb: bool) -> Self {
        Self {
            captured: None,
            perturb,
            replays: 0,
        }
    }

    /// Capture an overheard payload, replacing any earlier one.
    pub fn overhear(&mut self, payload: &[u8]) {
        self.captured = Some(payload.to_vec());
    }

    /// True once something has been captured.
    pub fn has_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Produce the next replay, or `None` while nothing has been captured.
    ///
    /// In perturbing mode one random byte is XORed with two random low
    /// bits, mimicking an attacker that slightly mangles each replay to
    /// dodge naive equality checks (the XOR can be zero, leaving the
    /// payload verbatim).
    pub fn next_replay(&mut self, rng: &mut StdRng) -> Option<Vec<u8>> {
        let captured = self.captured.as_ref()?;
        let mut msg = captured.clone();
        if self.perturb && !msg.is_empty() {
            let idx = rng.gen_range(0..msg.len());
            msg[idx] ^= rng.gen_range(0..4u8);
        }
        self.replays += 1;
        Some(msg)
    }

    /// Replays emitted so far.
    pub fn replays(&self) -> u64 {
        self.replays
    }
}
