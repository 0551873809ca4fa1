//! Snapshot monitoring.
//!
//! One [`MonitorTask`](crate::domain::MonitorTask) per subscriber, each
//! driven by its own tokio task on a fixed interval. Every tick takes a
//! candidate snapshot, admits keys not yet in the task's seen set and emits
//! one alert per admitted key.
//!
//! - [`tick`]: a single poll, fail-open
//! - [`registry`]: start/stop lifecycle and loop ownership

pub mod registry;
pub mod tick;

#[cfg(test)]
mod tests;

pub use registry::{MonitorRegistry, MonitorSettings};
pub use tick::{run_tick, TickContext, TickOutcome};

/// Default seconds between polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Default number of wallets attached to an enriched alert.
pub const DEFAULT_SAMPLE_WALLETS: usize = 3;
