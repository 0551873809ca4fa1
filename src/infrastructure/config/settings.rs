//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the provider API key is read from
//! the environment (see [`CodexConfig::api_key_env`]), never from the file.
//!
//! # Example
//!
//! ```no_run
//! use tradewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::monitor::{MonitorConfig, WatchConfig};
use crate::adapter::outbound::codex::CodexConfig;
use crate::error::{ConfigError, Result};

/// `[state]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// Subscriber book location.
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("data/subscribers.json")
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: CodexConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub watch: Vec<WatchConfig>,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the validation
    /// errors of [`Self::validate`].
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.provider.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        let url = Url::parse(&self.provider.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("unsupported scheme {}", url.scheme()),
            }
            .into());
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key_env",
            }
            .into());
        }
        if self.provider.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.monitor.default_min_usd < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "default_min_usd",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.monitor.lookback_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookback_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for watch in &self.watch {
            if watch.pair_id.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "pair_id" }.into());
            }
            if !seen.insert((watch.pair_id.to_ascii_lowercase(), watch.network_id)) {
                return Err(ConfigError::InvalidValue {
                    field: "watch",
                    reason: format!("pair {} listed twice", watch.pair_id),
                }
                .into());
            }
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.provider.api_url, "https://api.codex.io/graphql");
        assert_eq!(config.provider.api_key_env, "CODEX_API_KEY");
        assert_eq!(config.monitor.poll_interval_secs, 30);
        assert_eq!(config.monitor.default_min_usd, dec!(1000));
        assert_eq!(config.monitor.sample_wallets, 3);
        assert!(config.watch.is_empty());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::parse_toml("[monitor]\npoll_interval_secs = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_pairs_are_rejected() {
        let toml = r#"
[[watch]]
pair_id = "0xAbc"

[[watch]]
pair_id = "0xabc"
"#;
        let err = Config::parse_toml(toml).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "watch", .. })
        ));
    }

    #[test]
    fn bad_url_is_rejected() {
        let err = Config::parse_toml("[provider]\napi_url = \"not a url\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "api_url", .. })
        ));
    }
}
