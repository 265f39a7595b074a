//! # DIO Replay Mitigation Test Suite
//!
//! End-to-end scenarios exercising the detection engine through the
//! simulation harness. Unit-level properties live next to the code they
//! test inside each crate; this crate covers cross-component behavior.

#[cfg(test)]
mod integration;
