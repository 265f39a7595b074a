//! Domain layer: pure detection state and logic.
//!
//! Nothing in this module performs I/O, reads clocks, or draws randomness.
//! Time is passed in by callers and stochastic choices go through the
//! [`FlagSampler`](crate::ports::FlagSampler) port, so every operation here
//! is deterministic and directly testable.

pub mod config;
pub mod entities;
pub mod fingerprint;
pub mod ownership;
pub mod source_record;

pub use config::GuardConfig;
pub use entities::{DropReason, SourceId, Timestamp, Verdict};
pub use fingerprint::{fingerprint, Fingerprint};
pub use ownership::OwnershipTable;
pub use source_record::SourceRecord;
