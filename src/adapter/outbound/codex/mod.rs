//! Codex GraphQL provider adapter.
//!
//! Implements [`EventSource`](crate::port::EventSource) over
//! `getTokenEvents` and [`TokenDirectory`](crate::port::TokenDirectory) over
//! `filterTokens`.

mod client;
pub mod dto;
pub mod settings;

pub use client::CodexClient;
pub use settings::CodexConfig;
