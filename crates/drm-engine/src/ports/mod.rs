//! Ports layer: trait seams between the engine and its environment.
//!
//! Time is not a port here. Callers pass the current instant with every
//! message, which keeps the domain deterministic without indirection. The
//! only environmental dependency left is randomness for the probabilistic
//! same-source flagging decision.

/// Abstract source of Bernoulli trials for the same-source flagging
/// probability.
///
/// Production uses a real entropy source; tests inject seeded or constant
/// samplers to force deterministic outcomes.
pub trait FlagSampler: Send {
    /// Draw one trial: true with the given probability.
    ///
    /// `probability` has been validated to lie in [0, 1] at engine
    /// construction.
    fn should_flag(&mut self, probability: f64) -> bool;
}
