//! Monitor and watch-list configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::monitor::{
    MonitorSettings, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SAMPLE_WALLETS,
};

/// `[monitor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Threshold used when a subscriber starts without one.
    #[serde(default = "default_min_usd")]
    pub default_min_usd: Decimal,
    /// How far back each snapshot looks, in seconds.
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: u64,
    /// Width of the dedup time bucket. 0 disables time bucketing.
    #[serde(default = "default_time_bucket_secs")]
    pub time_bucket_secs: u64,
    /// Attach sample wallets to alerts.
    #[serde(default = "default_enrich")]
    pub enrich: bool,
    #[serde(default = "default_sample_wallets")]
    pub sample_wallets: usize,
}

const fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_min_usd() -> Decimal {
    Decimal::from(1000)
}

const fn default_lookback_secs() -> u64 {
    300
}

const fn default_time_bucket_secs() -> u64 {
    60
}

const fn default_enrich() -> bool {
    true
}

const fn default_sample_wallets() -> usize {
    DEFAULT_SAMPLE_WALLETS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            default_min_usd: default_min_usd(),
            lookback_secs: default_lookback_secs(),
            time_bucket_secs: default_time_bucket_secs(),
            enrich: default_enrich(),
            sample_wallets: default_sample_wallets(),
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            poll_interval_secs: self.poll_interval_secs,
            enrich: self.enrich,
            sample_wallets: self.sample_wallets,
        }
    }
}

/// One `[[watch]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    pub pair_id: String,
    #[serde(default = "default_network_id")]
    pub network_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    /// Link template with `{pair}` and `{tx}` placeholders.
    #[serde(default)]
    pub detail_url: Option<String>,
}

const fn default_network_id() -> u64 {
    1
}
