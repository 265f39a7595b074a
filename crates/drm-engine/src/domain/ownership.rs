//! Global fingerprint ownership table.
//!
//! Tracks, within the rolling detection window, which source first
//! produced a given fingerprint. A later claim by a *different* source is
//! the cross-source replay signal; ownership is sticky to the first live
//! claimant and is never overwritten by a conflicting source.

use std::collections::HashMap;
use std::time::Duration;

use super::entities::{SourceId, Timestamp};
use super::fingerprint::Fingerprint;

/// A live ownership claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Claim {
    owner: SourceId,
    claimed_at: Timestamp,
}

/// Fingerprint → first claimant within the current window.
///
/// Staleness is checked lazily on every read, so [`OwnershipTable::prune`]
/// is purely a memory-reclamation operation, not a correctness
/// requirement.
#[derive(Debug, Default)]
pub struct OwnershipTable {
    entries: HashMap<Fingerprint, Claim>,
}

impl OwnershipTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current live owner of `fp`, if any. Entries older than the window
    /// are semantically absent even while physically stored.
    pub fn lookup(
        &self,
        fp: Fingerprint,
        now: Timestamp,
        window: Duration,
    ) -> Option<(SourceId, Timestamp)> {
        self.entries
            .get(&fp)
            .filter(|claim| now.duration_since(claim.claimed_at) < window)
            .map(|claim| (claim.owner, claim.claimed_at))
    }

    /// Claim `fp` for `source`, but only when no live owner exists.
    ///
    /// A live claim (including the claimant's own) is left untouched:
    /// ownership stays with the first claimant, and its timestamp is not
    /// refreshed by legitimate re-sends. An expired claim is replaced.
    pub fn claim(&mut self, fp: Fingerprint, source: SourceId, now: Timestamp, window: Duration) {
        if self.lookup(fp, now, window).is_none() {
            self.entries.insert(
                fp,
                Claim {
                    owner: source,
                    claimed_at: now,
                },
            );
        }
    }

    /// Drop all stale entries to bound table growth under high-cardinality
    /// fingerprint traffic.
    pub fn prune(&mut self, now: Timestamp, window: Duration) {
        self.entries
            .retain(|_, claim| now.duration_since(claim.claimed_at) < window);
    }

    /// Number of physically stored entries (live and stale).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
