//! Tests for per-source detection state.

use std::time::Duration;

use super::SourceRecord;
use crate::domain::{fingerprint, Timestamp};

const WINDOW: Duration = Duration::from_secs(60);

fn ts(secs: u64) -> Timestamp {
    Timestamp::from_secs(secs)
}

// =============================================================================
// TEST GROUP 1: Ring buffer
// =============================================================================

#[test]
fn test_fresh_record_has_no_duplicates() {
    let record = SourceRecord::new(8, ts(0));
    assert!(!record.is_duplicate(fingerprint(b"x"), ts(0), WINDOW));
}

#[test]
fn test_duplicate_detected_inside_window() {
    let mut record = SourceRecord::new(8, ts(0));
    let fp = fingerprint(b"beacon");

    record.record_accepted(fp, ts(10));
    assert!(record.is_duplicate(fp, ts(30), WINDOW));
}

#[test]
fn test_duplicate_expires_with_window() {
    let mut record = SourceRecord::new(8, ts(0));
    let fp = fingerprint(b"beacon");

    record.record_accepted(fp, ts(10));
    // Exactly W later the slot is stale (strict `< W` freshness).
    assert!(!record.is_duplicate(fp, ts(70), WINDOW));
}

#[test]
fn test_eviction_after_k_distinct_fingerprints() {
    // With K slots, K further insertions evict the first fingerprint
    // even though it is still inside the window.
    let k = 4;
    let mut record = SourceRecord::new(k, ts(0));
    let first = fingerprint(b"payload-0");

    record.record_accepted(first, ts(1));
    for i in 1..=k {
        record.record_accepted(fingerprint(format!("payload-{i}").as_bytes()), ts(2));
    }

    assert!(!record.is_duplicate(first, ts(3), WINDOW));
    // The most recent K are still retrievable.
    assert!(record.is_duplicate(fingerprint(b"payload-4"), ts(3), WINDOW));
}

#[test]
fn test_single_slot_ring() {
    let mut record = SourceRecord::new(1, ts(0));
    let a = fingerprint(b"a");
    let b = fingerprint(b"b");

    record.record_accepted(a, ts(1));
    assert!(record.is_duplicate(a, ts(2), WINDOW));

    record.record_accepted(b, ts(3));
    assert!(!record.is_duplicate(a, ts(4), WINDOW));
    assert!(record.is_duplicate(b, ts(4), WINDOW));
}

// =============================================================================
// TEST GROUP 2: Suspicion and blacklist timing
// =============================================================================

#[test]
fn test_raise_below_threshold_does_not_blacklist() {
    let mut record = SourceRecord::new(8, ts(0));

    for _ in 0..4 {
        assert!(!record.raise_suspicion(ts(10), 5, WINDOW));
    }
    assert_eq!(record.suspicion(), 4);
    assert!(!record.is_blacklisted(ts(10)));
}

#[test]
fn test_threshold_crossing_blacklists_for_exactly_one_window() {
    // blacklisted_until == t + W exactly; unblocked at any time >= t + W.
    let mut record = SourceRecord::new(8, ts(0));

    for _ in 0..4 {
        record.raise_suspicion(ts(10), 5, WINDOW);
    }
    assert!(record.raise_suspicion(ts(30), 5, WINDOW));

    assert_eq!(record.blacklisted_until(), Some(ts(90)));
    assert!(record.is_blacklisted(ts(30)));
    assert!(record.is_blacklisted(ts(89)));
    assert!(!record.is_blacklisted(ts(90)));
    assert!(!record.is_blacklisted(ts(120)));
}

#[test]
fn test_suspicion_persists_after_expiry_by_default() {
    let mut record = SourceRecord::new(8, ts(0));
    for _ in 0..5 {
        record.raise_suspicion(ts(10), 5, WINDOW);
    }
    record.refresh(ts(100), false);

    // Escalating distrust: the very next raise re-triggers.
    assert_eq!(record.suspicion(), 5);
    assert!(record.raise_suspicion(ts(100), 5, WINDOW));
    assert_eq!(record.blacklisted_until(), Some(ts(160)));
}

#[test]
fn test_reset_on_expiry_clears_suspicion() {
    let mut record = SourceRecord::new(8, ts(0));
    for _ in 0..5 {
        record.raise_suspicion(ts(10), 5, WINDOW);
    }

    // Still active: refresh must not clear anything.
    record.refresh(ts(50), true);
    assert_eq!(record.suspicion(), 5);

    // Expired: clean slate.
    record.refresh(ts(70), true);
    assert_eq!(record.suspicion(), 0);
    assert_eq!(record.blacklisted_until(), None);
    assert!(!record.raise_suspicion(ts(70), 5, WINDOW));
}

#[test]
fn test_refresh_updates_last_seen() {
    let mut record = SourceRecord::new(8, ts(0));
    record.refresh(ts(42), false);
    assert_eq!(record.last_seen(), ts(42));
}
