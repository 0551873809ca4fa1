//! CLI module graph.

pub mod command;
pub mod config;
pub mod run;
pub mod status;
pub mod traders;
pub mod verify;

use serde::Serialize;

use crate::error::Result;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
