//! # DIO Replay Attack Simulation Harness
//!
//! A virtual-clock, discrete-event rendition of the classic wireless
//! replay-attack scenario: a root node periodically broadcasts routing
//! beacons, an attacker overhears them and floods verbatim replays, and
//! every node runs its own independent [`drm_engine::ReplayGuard`] to
//! decide accept/drop locally.
//!
//! The radio layer is deliberately abstract: a flat broadcast domain
//! where every send reaches all other nodes instantly. PHY modelling,
//! mobility and IP plumbing add nothing to the mitigation behavior under
//! study and are left out.
//!
//! # Example
//!
//! ```rust
//! use drm_sim::{SimConfig, Simulation};
//!
//! let config = SimConfig::default();
//! let report = Simulation::new(config).unwrap().run();
//! assert!(report.total_received > 0);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod node;
pub mod runner;

pub use config::SimConfig;
pub use error::SimError;
pub use runner::{Simulation, SummaryReport};
