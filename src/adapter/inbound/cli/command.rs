//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tradewatch application using `clap`.
//! Command output goes to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Large-trade monitoring and wallet aggregation over a trade-event provider
#[derive(Parser, Debug)]
#[command(name = "tradewatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the tradewatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run monitors in the foreground, printing alerts as JSON lines
    Run(RunArgs),

    /// Aggregate the traders of a token over a trailing window
    Traders(TradersArgs),

    /// Check that the live source exposes plausible data
    Verify,

    /// Show persisted subscriber state
    Status(StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `tradewatch config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Subscriber to start; repeatable. Defaults to `local` when nothing
    /// else is running.
    #[arg(short, long = "subscriber")]
    pub subscribers: Vec<String>,

    /// USD threshold for newly started subscribers.
    #[arg(long)]
    pub min_usd: Option<Decimal>,

    /// Ignore the persisted subscriber book.
    #[arg(long)]
    pub no_resume: bool,
}

/// Arguments for the `traders` subcommand.
#[derive(Parser, Debug)]
pub struct TradersArgs {
    /// Token search phrase (symbol, name or address).
    pub phrase: String,

    /// Minimum event size in USD.
    #[arg(long, default_value = "1000")]
    pub min_usd: Decimal,

    /// Provider network id.
    #[arg(long, default_value_t = 1)]
    pub network: u64,

    /// Trailing window in hours.
    #[arg(long, default_value_t = 24)]
    pub hours: u32,

    /// Only print the first N traders.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Only show this subscriber.
    #[arg(short, long)]
    pub subscriber: Option<String>,
}
