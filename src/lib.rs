//! Tradewatch - large-trade monitoring and wallet aggregation.
//!
//! Pulls trade events for a market pair from an upstream provider, reduces
//! them to per-wallet summaries, and runs per-subscriber polling loops that
//! alert once on every newly observed high-value trade.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Provider-agnostic types and their invariants
//! - [`port`] - Traits the core drives (event source, candidate source,
//!   alert sink, subscriber store, clock) and the control surface it exposes
//! - [`application`] - Event fetching, trader aggregation, the monitor
//!   registry, the verification probe and the trader query
//! - [`adapter`] - Codex GraphQL client, event-backed candidate source,
//!   sinks, JSON store and the CLI
//! - [`infrastructure`] - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use tradewatch::application::aggregate::aggregate_traders;
//!
//! let summaries = aggregate_traders(&[]);
//! assert!(summaries.is_empty());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
