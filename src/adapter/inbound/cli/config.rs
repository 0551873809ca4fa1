//! Handler for the `config` command group.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    println!("Configuration is valid: {}", path.display());
    println!("  provider:  {}", config.provider.api_url);
    println!("  pairs:     {}", config.watch.len());
    println!("  interval:  {}s", config.monitor.poll_interval_secs);
    if config.provider.api_key().is_none() {
        println!("  warning:   {} is not set", config.provider.api_key_env);
    }
    Ok(())
}
