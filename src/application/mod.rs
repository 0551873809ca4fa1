//! Application services (use cases).
//!
//! These services orchestrate domain logic and drive outbound ports to
//! implement the application's use cases.

pub mod aggregate;
pub mod fetch;
pub mod monitor;
pub mod probe;
pub mod query;

pub use aggregate::{aggregate_traders, top_wallets};
pub use fetch::{EventFetcher, PAGE_SIZE};
pub use monitor::{MonitorRegistry, MonitorSettings};
pub use probe::{ProbeReport, VerificationProbe};
pub use query::TraderQuery;
