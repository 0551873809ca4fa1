//! Token lookup results and trader reports.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::summary::TraderSummary;

/// A token as returned by the provider's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub id: String,
    pub address: String,
    pub network_id: u64,
    pub name: String,
    pub symbol: String,
}

/// Closed time range in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
    pub hours: u32,
}

impl TimeWindow {
    /// Window of `hours` ending at `now`.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, hours: u32) -> Self {
        let to = now.timestamp();
        Self {
            from: to - i64::from(hours) * 3600,
            to,
            hours,
        }
    }
}

/// Traders of one token over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderReport {
    pub token: TokenInfo,
    pub traders: Vec<TraderSummary>,
    pub total_events: usize,
    pub window: TimeWindow,
    pub min_usd: Decimal,
}
