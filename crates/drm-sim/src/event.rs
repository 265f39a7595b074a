//! Discrete-event scheduling.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use drm_engine::Timestamp;

/// Things that can fire during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The root broadcasts its next beacon.
    RootBeacon,
    /// The attacker replays its captured beacon (or retries capture).
    AttackerReplay,
}

#[derive(Debug, PartialEq, Eq)]
struct Scheduled {
    at: Timestamp,
    /// Insertion order, breaks ties FIFO.
    seq: u64,
    event: Event,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.at.cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered event queue over virtual time.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `at`.
    pub fn schedule(&mut self, at: Timestamp, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled { at, seq, event }));
    }

    /// Pop the earliest pending event.
    pub fn pop(&mut self) -> Option<(Timestamp, Event)> {
        self.heap.pop().map(|Reverse(s)| (s.at, s.event))
    }

    /// True iff nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
