//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Scripted [`EventSource`](crate::port::EventSource),
//!   [`TokenDirectory`](crate::port::TokenDirectory) and
//!   [`CandidateSource`](crate::port::CandidateSource) implementations.
//! - [`sink`] - `RecordingSink` for alert assertions.
//! - [`clock`] - `ManualClock` for deterministic timestamps.
//! - [`domain`] - Builders for events and candidates.

pub mod clock;
pub mod domain;
pub mod sink;
pub mod source;
