//! Trade events as reported by the upstream provider.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a swap from the maker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "Buy", alias = "BUY")]
    Buy,
    #[serde(alias = "Sell", alias = "SELL")]
    Sell,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Side {
    /// Provider enum literal used when filtering queries by side.
    #[must_use]
    pub const fn as_query_literal(self) -> Option<&'static str> {
        match self {
            Self::Buy => Some("Buy"),
            Self::Sell => Some("Sell"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One atomic buy/sell record.
///
/// Produced only by the event fetcher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    pub id: String,
    pub tx_hash: String,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub side: Side,
    pub maker_wallet: String,
    #[serde(default)]
    pub amount_usd: Option<Decimal>,
    #[serde(default)]
    pub price_usd: Option<Decimal>,
}

impl TradeEvent {
    /// USD amount with an absent value treated as zero.
    #[must_use]
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount_usd.unwrap_or(Decimal::ZERO)
    }

    /// Price if the event carries a usable one. Zero prices count as absent.
    #[must_use]
    pub fn usable_price(&self) -> Option<Decimal> {
        self.price_usd.filter(|p| !p.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_accepts_provider_casing() {
        let buy: Side = serde_json::from_str("\"Buy\"").unwrap();
        let sell: Side = serde_json::from_str("\"sell\"").unwrap();
        let other: Side = serde_json::from_str("\"Mint\"").unwrap();
        assert_eq!(buy, Side::Buy);
        assert_eq!(sell, Side::Sell);
        assert_eq!(other, Side::Unknown);
    }

    #[test]
    fn zero_price_is_not_usable() {
        let event = TradeEvent {
            id: "e1".into(),
            tx_hash: "0xabc".into(),
            timestamp: 1_700_000_000,
            side: Side::Buy,
            maker_wallet: "0xA".into(),
            amount_usd: None,
            price_usd: Some(Decimal::ZERO),
        };
        assert_eq!(event.usable_price(), None);
        assert_eq!(event.amount_or_zero(), dec!(0));
    }
}
