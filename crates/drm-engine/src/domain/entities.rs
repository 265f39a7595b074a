//! Core domain entities: source identity, virtual time, verdicts.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier for a message origin.
///
/// In the broadcast setting this is the sender's network address; the
/// engine only relies on it being equality-comparable and hashable. It is
/// explicitly NOT an authenticated identity; a spoofing sender earns its
/// spoofed address the penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(IpAddr);

impl SourceId {
    /// Create a source id from a network address.
    pub fn new(addr: IpAddr) -> Self {
        Self(addr)
    }

    /// The underlying address.
    pub fn addr(&self) -> IpAddr {
        self.0
    }
}

impl From<IpAddr> for SourceId {
    fn from(addr: IpAddr) -> Self {
        Self(addr)
    }
}

impl From<Ipv4Addr> for SourceId {
    fn from(addr: Ipv4Addr) -> Self {
        Self(IpAddr::V4(addr))
    }
}

impl From<Ipv6Addr> for SourceId {
    fn from(addr: Ipv6Addr) -> Self {
        Self(IpAddr::V6(addr))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Virtual monotonic time in milliseconds.
///
/// The engine never reads a clock; the surrounding transport or simulation
/// layer supplies the current instant with every message. Arithmetic
/// saturates so hostile or buggy inputs cannot overflow comparisons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero instant.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a timestamp from whole seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    /// Milliseconds since the zero instant.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Seconds since the zero instant, fractional.
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Advance by a duration (saturating).
    pub fn add(&self, d: Duration) -> Self {
        Self(self.0.saturating_add(d.as_millis() as u64))
    }

    /// Elapsed time since `earlier`, saturating at zero for out-of-order
    /// inputs.
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// Why a message was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// Source is inside an active blacklist window.
    Blacklisted,
    /// Fingerprint is owned by a different live source.
    CrossSourceReplay,
    /// Fingerprint already in the sender's own recent cache.
    SameSourceDuplicate,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklisted => write!(f, "blacklisted"),
            Self::CrossSourceReplay => write!(f, "cross-source replay"),
            Self::SameSourceDuplicate => write!(f, "same-source duplicate"),
        }
    }
}

/// Terminal outcome of one pipeline invocation.
///
/// Exactly one of the four outcomes (`Accept` or a `Drop` with one of
/// three reasons) is produced per message, each backed by a disjoint
/// telemetry counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Message is genuinely new: deliver it to the routing layer.
    Accept,
    /// Message is suppressed.
    Drop(DropReason),
}

impl Verdict {
    /// True iff the message was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}
