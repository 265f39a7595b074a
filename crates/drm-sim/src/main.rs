//! # drm-sim
//!
//! Command-line front-end for the replay-attack simulation: builds a
//! scenario from CLI flags, runs it on the virtual clock, and prints the
//! aggregated summary (human-readable or JSON).

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use drm_engine::GuardConfig;
use drm_sim::{SimConfig, Simulation};

/// Replay/flood attack simulation with per-node adaptive suppression.
#[derive(Debug, Parser)]
#[command(name = "drm-sim", version, about)]
struct Cli {
    /// Number of nodes (node 0 is the root, the last node the attacker).
    #[arg(long, default_value_t = 20)]
    nodes: usize,

    /// Simulated time in seconds.
    #[arg(long, default_value_t = 60.0)]
    sim_time: f64,

    /// Seconds between root beacons.
    #[arg(long, default_value_t = 5.0)]
    beacon_interval: f64,

    /// Second at which the attacker starts replaying.
    #[arg(long, default_value_t = 12.0)]
    attack_start: f64,

    /// Attacker replays per second.
    #[arg(long, default_value_t = 5.0)]
    attacker_rate: f64,

    /// Use fresh random beacon payloads instead of a fixed one.
    #[arg(long)]
    random_root: bool,

    /// Attacker perturbs each replay with small random noise.
    #[arg(long)]
    randomize_attacker: bool,

    /// Run the guards in observability-only mode (no suppression).
    #[arg(long)]
    disable_protection: bool,

    /// Clear a source's suspicion once its blacklist expires.
    #[arg(long)]
    reset_on_expiry: bool,

    /// Detection window in seconds.
    #[arg(long, default_value_t = 60.0)]
    window: f64,

    /// Fingerprint cache slots per source.
    #[arg(long, default_value_t = 8)]
    cache_slots: usize,

    /// Suspicion threshold for blacklisting.
    #[arg(long, default_value_t = 5)]
    threshold: u32,

    /// Probability of flagging a same-source duplicate.
    #[arg(long, default_value_t = 0.30)]
    flag_probability: f64,

    /// Seed for all randomness (payloads, perturbation, samplers).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Lossy seconds → Duration; out-of-range values become zero and are
/// rejected by config validation with a proper error.
fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

impl Cli {
    fn into_config(self) -> SimConfig {
        SimConfig {
            nodes: self.nodes,
            sim_time: secs(self.sim_time),
            beacon_interval: secs(self.beacon_interval),
            attack_start: secs(self.attack_start),
            attacker_rate: self.attacker_rate,
            deterministic_beacons: !self.random_root,
            perturb_replays: self.randomize_attacker,
            seed: self.seed,
            guard: GuardConfig {
                window: secs(self.window),
                cache_slots: self.cache_slots,
                suspicion_threshold: self.threshold,
                same_source_flag_probability: self.flag_probability,
                protection_enabled: !self.disable_protection,
                reset_suspicion_on_expiry: self.reset_on_expiry,
            },
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    let cli = Cli::parse();
    let json = cli.json;

    let simulation = Simulation::new(cli.into_config()).context("building simulation")?;
    let report = simulation.run();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
