//! # DIO Replay Mitigation Engine
//!
//! Per-node replay/flood detection and adaptive suppression for RPL-style
//! routing control messages (DIO/DAO beacons, treated as opaque payloads).
//!
//! Each node runs one [`ReplayGuard`] instance. Every inbound control
//! message is reduced to a cheap 16-bit fingerprint and pushed through a
//! fixed decision pipeline:
//!
//! ```text
//! (source, payload, now)
//!        │
//!        ▼
//!  blacklist check ──→ drop (no suspicion accounting)
//!        │
//!        ▼
//!  cross-source replay check ──→ raise suspicion, drop
//!        │
//!        ▼
//!  same-source duplicate check ──→ drop (suspicion raised with prob. p)
//!        │
//!        ▼
//!     accept (record fingerprint, claim ownership)
//! ```
//!
//! Suspicion escalates per source; crossing the configured threshold
//! blacklists the source for exactly one detection window. Blacklists
//! expire on their own, so transient bursts are not permanently penalized.
//! There is no central coordinator and no cryptographic verification:
//! detection is a local, probabilistic defense, not an authentication
//! scheme.
//!
//! ## Architecture
//!
//! The crate follows the hexagonal layout:
//! - **Domain layer:** pure detection state (fingerprints, per-source
//!   records, the global ownership table) with no I/O
//! - **Ports layer:** the [`FlagSampler`] seam for stochastic decisions
//! - **Adapters layer:** rand-backed samplers (entropy, seeded, constant)
//! - **Service layer:** [`ReplayGuard`], the per-message decision pipeline
//!
//! Time is never read by the engine itself; callers supply a monotonic
//! [`Timestamp`] with every message, which keeps the engine fully
//! deterministic under test and under virtual-clock simulation.
//!
//! ## Example
//!
//! ```rust
//! use drm_engine::{fingerprint, GuardConfig, ReplayGuard, SourceId, Timestamp, Verdict};
//! use std::net::Ipv4Addr;
//!
//! let mut guard = ReplayGuard::seeded(GuardConfig::default(), 7).unwrap();
//! let neighbor = SourceId::from(Ipv4Addr::new(10, 1, 1, 2));
//!
//! let verdict = guard.on_message(neighbor, b"dio-beacon", Timestamp::from_secs(1));
//! assert_eq!(verdict, Verdict::Accept);
//! assert_eq!(guard.owner_of(fingerprint(b"dio-beacon"), Timestamp::from_secs(2)), Some(neighbor));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// =============================================================================
// CORE RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    fingerprint, DropReason, Fingerprint, GuardConfig, OwnershipTable, SourceId, SourceRecord,
    Timestamp, Verdict,
};

// Port traits
pub use ports::FlagSampler;

// Adapters
pub use adapters::{ConstantSampler, SeededSampler, ThreadRngSampler};

// Service
pub use service::{GuardStats, ReplayGuard};

// Errors
pub use error::ConfigError;
