//! Per-source detection state.
//!
//! One record per observed source, created lazily on its first message and
//! kept for the lifetime of the engine. Memory is bounded by the number of
//! distinct sources plus `K` fingerprint slots each.

#[cfg(test)]
mod tests;

use std::time::Duration;

use super::entities::Timestamp;
use super::fingerprint::Fingerprint;

/// Detection state for a single source.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// Ring buffer of the `K` most recent accepted fingerprints. The
    /// cursor overwrites unconditionally, so entries older than the `K`
    /// latest are evicted even while still inside the detection window,
    /// a deliberate bounded-memory trade-off.
    recent: Box<[Option<(Fingerprint, Timestamp)>]>,
    /// Next slot to overwrite.
    cursor: usize,
    /// Accumulated misbehavior count. Monotone unless the engine is
    /// configured to reset it on blacklist expiry.
    suspicion: u32,
    /// Suppression deadline; the source is blacklisted while `now` is
    /// strictly before it.
    blacklisted_until: Option<Timestamp>,
    /// Last message instant, bookkeeping only.
    last_seen: Timestamp,
}

impl SourceRecord {
    /// Create an empty record with `cache_slots` ring slots.
    ///
    /// `cache_slots` has already been validated to be ≥ 1.
    pub fn new(cache_slots: usize, now: Timestamp) -> Self {
        Self {
            recent: vec![None; cache_slots].into_boxed_slice(),
            cursor: 0,
            suspicion: 0,
            blacklisted_until: None,
            last_seen: now,
        }
    }

    /// True iff any occupied slot holds `fp` with a timestamp still inside
    /// the window. O(K) scan.
    pub fn is_duplicate(&self, fp: Fingerprint, now: Timestamp, window: Duration) -> bool {
        self.recent
            .iter()
            .flatten()
            .any(|&(slot_fp, slot_ts)| slot_fp == fp && now.duration_since(slot_ts) < window)
    }

    /// Record an accepted fingerprint: overwrite the cursor slot whether
    /// or not its previous occupant was still fresh, then advance.
    pub fn record_accepted(&mut self, fp: Fingerprint, now: Timestamp) {
        self.recent[self.cursor] = Some((fp, now));
        self.cursor = (self.cursor + 1) % self.recent.len();
    }

    /// True while the source is inside an active blacklist window.
    pub fn is_blacklisted(&self, now: Timestamp) -> bool {
        self.blacklisted_until.is_some_and(|until| now < until)
    }

    /// Increment suspicion; once it reaches `threshold`, blacklist the
    /// source for exactly `window` from `now`.
    ///
    /// Returns true iff this raise triggered a new blacklist. The caller
    /// never invokes this while a blacklist is already active (the
    /// pipeline short-circuits on the blacklist check), so every
    /// triggering raise starts a fresh window.
    pub fn raise_suspicion(&mut self, now: Timestamp, threshold: u32, window: Duration) -> bool {
        self.suspicion = self.suspicion.saturating_add(1);
        if self.suspicion >= threshold {
            self.blacklisted_until = Some(now.add(window));
            return true;
        }
        false
    }

    /// Bookkeeping on every inbound message: update `last_seen` and, when
    /// `reset_on_expiry` is set, clear an expired blacklist together with
    /// the suspicion it accumulated.
    pub fn refresh(&mut self, now: Timestamp, reset_on_expiry: bool) {
        self.last_seen = now;
        if reset_on_expiry {
            if let Some(until) = self.blacklisted_until {
                if now >= until {
                    self.blacklisted_until = None;
                    self.suspicion = 0;
                }
            }
        }
    }

    /// Current suspicion count.
    pub fn suspicion(&self) -> u32 {
        self.suspicion
    }

    /// Current blacklist deadline, if one was ever set.
    pub fn blacklisted_until(&self) -> Option<Timestamp> {
        self.blacklisted_until
    }

    /// Last message instant.
    pub fn last_seen(&self) -> Timestamp {
        self.last_seen
    }
}
