//! Simulation driver and result aggregation.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use drm_engine::{ReplayGuard, SourceId, Timestamp};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::event::{Event, EventQueue};
use crate::node::{ReplayAttacker, RootBeacon, SimNode};

/// How long the attacker waits before re-checking for a captured beacon.
const CAPTURE_RETRY: Duration = Duration::from_millis(500);

/// Aggregated results of one run, summed over every node's guard.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Beacons broadcast by the root.
    pub root_sends: u64,
    /// Replays broadcast by the attacker.
    pub attacker_replays: u64,
    /// Messages received across all guards.
    pub total_received: u64,
    /// Messages accepted across all guards.
    pub accepted: u64,
    /// Messages dropped across all guards.
    pub total_dropped: u64,
    /// Drops caused by mitigation logic.
    pub mitigation_drops: u64,
    /// Suspicion raises across all guards.
    pub suspicious_events: u64,
    /// Blacklists entered across all guards.
    pub blacklist_events: u64,
    /// Earliest first-blacklist instant over all nodes, if any.
    pub first_detection: Option<Timestamp>,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SIMULATION COMPLETE ===")?;
        writeln!(f, "Beacons sent by root:        {}", self.root_sends)?;
        writeln!(f, "Replays sent by attacker:    {}", self.attacker_replays)?;
        writeln!(f, "Total messages received:     {}", self.total_received)?;
        writeln!(f, "Total messages accepted:     {}", self.accepted)?;
        writeln!(f, "Total messages dropped:      {}", self.total_dropped)?;
        writeln!(f, "Drops due to mitigation:     {}", self.mitigation_drops)?;
        writeln!(f, "Total suspicious events:     {}", self.suspicious_events)?;
        writeln!(f, "Total blacklist events:      {}", self.blacklist_events)?;
        match self.first_detection {
            Some(at) => writeln!(f, "Detection time (first blacklist): {at}")?,
            None => writeln!(f, "Detection time: NONE (no node blacklisted a source)")?,
        }
        write!(f, "===========================")
    }
}

/// One self-contained simulation run.
///
/// Node 0 is the root beacon source; the last node doubles as the replay
/// attacker. Every node, root and attacker included, runs its own guard
/// over everything it overhears.
pub struct Simulation {
    config: SimConfig,
    nodes: Vec<SimNode>,
    root: RootBeacon,
    attacker: ReplayAttacker,
    queue: EventQueue,
    rng: StdRng,
}

impl Simulation {
    /// Build a simulation from a validated configuration.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut nodes = Vec::with_capacity(config.nodes);
        for i in 0..config.nodes {
            let source = SourceId::from(Ipv4Addr::new(10, 1, 1, (i + 1) as u8));
            // Distinct sampler stream per node, all derived from the run seed.
            let guard = ReplayGuard::seeded(
                config.guard.clone(),
                config.seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            )?;
            nodes.push(SimNode::new(source, guard));
        }

        let root = RootBeacon::new(config.deterministic_beacons);
        let attacker = ReplayAttacker::new(config.perturb_replays);
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            nodes,
            root,
            attacker,
            queue: EventQueue::new(),
            rng,
        })
    }

    /// Drive the event queue to the end of simulated time and aggregate.
    pub fn run(mut self) -> SummaryReport {
        let end = Timestamp::ZERO.add(self.config.sim_time);
        self.queue
            .schedule(Timestamp::ZERO.add(self.config.beacon_start), Event::RootBeacon);
        self.queue
            .schedule(Timestamp::ZERO.add(self.config.attack_start), Event::AttackerReplay);

        info!(
            nodes = self.config.nodes,
            sim_time = ?self.config.sim_time,
            "simulation started"
        );

        while let Some((now, event)) = self.queue.pop() {
            if now >= end {
                break;
            }
            match event {
                Event::RootBeacon => {
                    let payload = self.root.next_payload(&mut self.rng);
                    debug!(at = %now, "root beacon");
                    self.broadcast(0, &payload, now);
                    self.queue
                        .schedule(now.add(self.config.beacon_interval), Event::RootBeacon);
                }
                Event::AttackerReplay => {
                    let attacker_idx = self.nodes.len() - 1;
                    match self.attacker.next_replay(&mut self.rng) {
                        Some(payload) => {
                            debug!(at = %now, "attacker replay");
                            self.broadcast(attacker_idx, &payload, now);
                            let gap = Duration::from_secs_f64(1.0 / self.config.attacker_rate);
                            self.queue.schedule(now.add(gap), Event::AttackerReplay);
                        }
                        // Nothing overheard yet: try again shortly.
                        None => self
                            .queue
                            .schedule(now.add(CAPTURE_RETRY), Event::AttackerReplay),
                    }
                }
            }
        }

        self.report()
    }

    /// Deliver a broadcast to every node except the sender, at send time.
    fn broadcast(&mut self, sender_idx: usize, payload: &[u8], now: Timestamp) {
        let sender = self.nodes[sender_idx].source();
        let attacker_idx = self.nodes.len() - 1;

        for idx in 0..self.nodes.len() {
            if idx == sender_idx {
                continue;
            }
            if idx == attacker_idx {
                self.attacker.overhear(payload);
            }
            self.nodes[idx].on_receive(sender, payload, now);
        }
    }

    fn report(&self) -> SummaryReport {
        let mut report = SummaryReport {
            root_sends: self.root.sends(),
            attacker_replays: self.attacker.replays(),
            total_received: 0,
            accepted: 0,
            total_dropped: 0,
            mitigation_drops: 0,
            suspicious_events: 0,
            blacklist_events: 0,
            first_detection: None,
        };

        for node in &self.nodes {
            let stats = node.guard().stats();
            report.total_received += stats.total_received;
            report.accepted += stats.accepted;
            report.total_dropped += stats.total_dropped;
            report.mitigation_drops += stats.mitigation_drops;
            report.suspicious_events += stats.suspicious_events;
            report.blacklist_events += stats.blacklist_events;
            if let Some(at) = stats.first_blacklist {
                report.first_detection = Some(match report.first_detection {
                    Some(earliest) if earliest <= at => earliest,
                    _ => at,
                });
            }
        }

        report
    }
}
