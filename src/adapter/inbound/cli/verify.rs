//! Handler for the `verify` command.

use crate::adapter::inbound::cli::print_json;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run the probe once. Returns whether the source looked plausible.
pub async fn execute(config: &Config) -> Result<bool> {
    let services = bootstrap::build_services(config)?;
    let report = bootstrap::build_probe(&services).verify().await;
    print_json(&report)?;
    Ok(report.plausible)
}
