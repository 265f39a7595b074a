//! # Replay Guard Service
//!
//! The per-message decision pipeline. One instance per node, single
//! threaded: messages are processed to completion in arrival order, and
//! the pipeline is the sole mutator of all detection state.
//!
//! Pipeline order for an inbound `(source, payload, now)`:
//!
//! 1. fingerprint + lazy per-source record creation
//! 2. observability-only short-circuit when protection is disabled
//! 3. blacklist check (drops without any suspicion accounting)
//! 4. cross-source replay check against the global ownership table
//! 5. same-source duplicate check against the sender's ring buffer
//! 6. accept: record the fingerprint and claim ownership
//!
//! Every invocation ends in exactly one of the four outcomes of
//! [`Verdict`], each backed by a disjoint counter in [`GuardStats`].


use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::{SeededSampler, ThreadRngSampler};
use crate::domain::{
    fingerprint, DropReason, Fingerprint, GuardConfig, OwnershipTable, SourceId, SourceRecord,
    Timestamp, Verdict,
};
use crate::error::ConfigError;
use crate::ports::FlagSampler;

/// Prune the ownership table every this many received messages.
const PRUNE_INTERVAL: u32 = 256;

/// Monotonically increasing telemetry counters.
///
/// `total_dropped` is the sum of the three per-reason drop counters;
/// `mitigation_drops` mirrors it for the engine (every drop here is a
/// mitigation decision) and exists so callers aggregating across layers
/// can distinguish engine drops from e.g. transport losses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuardStats {
    /// Messages presented to the pipeline.
    pub total_received: u64,
    /// Messages accepted for delivery.
    pub accepted: u64,
    /// Messages dropped, all reasons.
    pub total_dropped: u64,
    /// Drops caused by mitigation logic.
    pub mitigation_drops: u64,
    /// Drops while the source was blacklisted.
    pub blacklisted_drops: u64,
    /// Drops for fingerprints owned by a different source.
    pub cross_source_drops: u64,
    /// Drops for repeats within the sender's own recent cache.
    pub duplicate_drops: u64,
    /// Suspicion raises (both triggers combined).
    pub suspicious_events: u64,
    /// Blacklists entered.
    pub blacklist_events: u64,
    /// Instant of the first blacklist at this node, if any.
    pub first_blacklist: Option<Timestamp>,
}

/// Replay/flood detection and adaptive suppression engine for one node.
///
/// All state is in-memory for the instance's lifetime. Per-source records
/// are created lazily and never destroyed (bounded by distinct sources
/// observed); the ownership table is pruned periodically.
pub struct ReplayGuard {
    /// Immutable configuration.
    config: GuardConfig,
    /// One record per observed source, never aliased.
    records: HashMap<SourceId, SourceRecord>,
    /// Fingerprint → first live claimant.
    ownership: OwnershipTable,
    /// Bernoulli trials for same-source flagging.
    sampler: Box<dyn FlagSampler>,
    /// Telemetry counters.
    stats: GuardStats,
    /// Messages since the last ownership prune.
    msgs_since_prune: u32,
}

impl ReplayGuard {
    /// Create an engine with an explicit sampler.
    ///
    /// Rejects configuration values outside their documented ranges.
    pub fn new(config: GuardConfig, sampler: Box<dyn FlagSampler>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            records: HashMap::new(),
            ownership: OwnershipTable::new(),
            sampler,
            stats: GuardStats::default(),
            msgs_since_prune: 0,
        })
    }

    /// Create an engine with a seeded sampler for reproducible runs.
    pub fn seeded(config: GuardConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(SeededSampler::new(seed)))
    }

    /// Create an engine with an entropy-backed sampler.
    pub fn with_entropy(config: GuardConfig) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(ThreadRngSampler::new()))
    }

    /// Process one inbound control message and decide its fate.
    ///
    /// Synchronous and bounded: an O(K) ring scan plus O(1) amortized map
    /// operations. Never fails: `Drop` is an expected outcome, not an
    /// error, and an unknown source simply creates a fresh record.
    pub fn on_message(&mut self, source: SourceId, payload: &[u8], now: Timestamp) -> Verdict {
        self.stats.total_received += 1;

        self.msgs_since_prune += 1;
        if self.msgs_since_prune >= PRUNE_INTERVAL {
            self.ownership.prune(now, self.config.window);
            self.msgs_since_prune = 0;
        }

        let fp = fingerprint(payload);
        let config = &self.config;
        let record = self
            .records
            .entry(source)
            .or_insert_with(|| SourceRecord::new(config.cache_slots, now));
        record.refresh(now, config.reset_suspicion_on_expiry);

        // Observability-only mode: accept everything, still record the
        // fingerprint for bookkeeping.
        if !config.protection_enabled {
            record.record_accepted(fp, now);
            self.stats.accepted += 1;
            debug!(%source, %fp, "accepted (protection disabled)");
            return Verdict::Accept;
        }

        // Active blacklist short-circuits everything, including suspicion
        // accounting.
        if record.is_blacklisted(now) {
            self.stats.total_dropped += 1;
            self.stats.mitigation_drops += 1;
            self.stats.blacklisted_drops += 1;
            debug!(%source, %fp, "dropped: source blacklisted");
            return Verdict::Drop(DropReason::Blacklisted);
        }

        // Cross-source replay: full confidence, deterministic raise. The
        // original owner keeps precedence; the conflicting claim is never
        // written.
        if let Some((owner, _)) = self.ownership.lookup(fp, now, config.window) {
            if owner != source {
                warn!(%source, %owner, %fp, "cross-source replay detected");
                let newly_blacklisted =
                    record.raise_suspicion(now, config.suspicion_threshold, config.window);
                self.stats.suspicious_events += 1;
                if newly_blacklisted {
                    Self::note_blacklist(&mut self.stats, source, now);
                }
                self.stats.total_dropped += 1;
                self.stats.mitigation_drops += 1;
                self.stats.cross_source_drops += 1;
                return Verdict::Drop(DropReason::CrossSourceReplay);
            }
        }

        // Same-source duplicate: the drop is unconditional, only the
        // suspicion raise is probabilistic.
        if record.is_duplicate(fp, now, config.window) {
            if self.sampler.should_flag(config.same_source_flag_probability) {
                let newly_blacklisted =
                    record.raise_suspicion(now, config.suspicion_threshold, config.window);
                self.stats.suspicious_events += 1;
                warn!(
                    %source, %fp,
                    suspicion = record.suspicion(),
                    "suspicious same-source duplicate"
                );
                if newly_blacklisted {
                    Self::note_blacklist(&mut self.stats, source, now);
                }
            }
            self.stats.total_dropped += 1;
            self.stats.mitigation_drops += 1;
            self.stats.duplicate_drops += 1;
            return Verdict::Drop(DropReason::SameSourceDuplicate);
        }

        // Genuinely new message.
        record.record_accepted(fp, now);
        self.ownership.claim(fp, source, now, config.window);
        self.stats.accepted += 1;
        debug!(%source, %fp, "accepted");
        Verdict::Accept
    }

    fn note_blacklist(stats: &mut GuardStats, source: SourceId, now: Timestamp) {
        stats.blacklist_events += 1;
        if stats.first_blacklist.is_none() {
            stats.first_blacklist = Some(now);
        }
        warn!(%source, at = %now, "source blacklisted");
    }

    // =========================================================================
    // READ-ONLY TELEMETRY
    // =========================================================================

    /// Telemetry counters.
    pub fn stats(&self) -> &GuardStats {
        &self.stats
    }

    /// Engine configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Current suspicion count for a source, if it has been observed.
    pub fn suspicion(&self, source: &SourceId) -> Option<u32> {
        self.records.get(source).map(|r| r.suspicion())
    }

    /// Whether a source is inside an active blacklist window.
    pub fn is_blacklisted(&self, source: &SourceId, now: Timestamp) -> bool {
        self.records
            .get(source)
            .is_some_and(|r| r.is_blacklisted(now))
    }

    /// The source's blacklist deadline, if one was ever set.
    pub fn blacklisted_until(&self, source: &SourceId) -> Option<Timestamp> {
        self.records.get(source).and_then(|r| r.blacklisted_until())
    }

    /// Current live owner of a fingerprint.
    pub fn owner_of(&self, fp: Fingerprint, now: Timestamp) -> Option<SourceId> {
        self.ownership
            .lookup(fp, now, self.config.window)
            .map(|(owner, _)| owner)
    }

    /// Number of distinct sources observed so far.
    pub fn tracked_sources(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Debug for ReplayGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayGuard")
            .field("config", &self.config)
            .field("tracked_sources", &self.records.len())
            .field("ownership_entries", &self.ownership.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
