//! Outbound adapters (driven side).

pub mod candidate;
pub mod codex;
pub mod sink;
pub mod store;
