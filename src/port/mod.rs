//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (trade providers, alert channels, subscriber storage).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Provider │            │ Subscriber  │              │   Alert   │
//! │ Adapter │            │    Store    │              │   Sink    │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`EventSource`], [`TokenDirectory`] - Paged trade events and token search
//! - [`CandidateSource`], [`CandidateSession`] - Tick-scoped candidate snapshots
//! - [`AlertSink`] - Alert delivery (logging, channels, chat bots)
//! - [`SubscriberStore`] - Persistence of subscriber state
//! - [`Clock`] - Injectable wall clock
//! - [`MonitorControl`] - Start/stop/status control surface

pub mod inbound;
pub mod outbound;

pub use inbound::control::MonitorControl;
pub use outbound::candidate::{CandidateSession, CandidateSource};
pub use outbound::clock::{Clock, SystemClock};
pub use outbound::events::{EventPage, EventQuery, EventSource, PageInfo, TokenDirectory};
pub use outbound::sink::{AlertSink, LogSink, NullSink, SinkRegistry};
pub use outbound::store::SubscriberStore;
