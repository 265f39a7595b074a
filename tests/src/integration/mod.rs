//! End-to-end attack scenarios.

mod attack_scenarios;
