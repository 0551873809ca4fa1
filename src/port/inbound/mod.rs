//! Inbound (driving) ports consumed by inbound adapters.
//!
//! Inbound ports expose application capabilities to external drivers such as
//! the command-line interface or a chat bot.
//!
//! # Modules
//!
//! - [`control`]: Start/stop/status for per-subscriber monitors

pub mod control;
