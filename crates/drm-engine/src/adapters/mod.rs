//! Adapters layer: concrete implementations of the port traits.

pub mod sampler;

pub use sampler::{ConstantSampler, SeededSampler, ThreadRngSampler};
