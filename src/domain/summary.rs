//! Per-wallet trade summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated activity of one maker wallet over an event list.
///
/// Derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderSummary {
    pub wallet: String,
    pub order_count: u64,
    /// Rounded to the nearest whole currency unit.
    pub total_usd: Decimal,
    pub avg_price_usd: Option<Decimal>,
    /// Unix seconds of the earliest event.
    pub first_seen: i64,
    /// Unix seconds of the latest event.
    pub last_seen: i64,
}
