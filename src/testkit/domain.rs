//! Builders for domain primitives used across tests.
//!
//! Concise factory functions for [`TradeEvent`] and [`CandidateItem`] so
//! tests focus on assertions rather than construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::{CandidateItem, Side, TradeEvent, WatchKey};

/// A buy event with an amount and no price.
pub fn trade(maker: &str, timestamp: i64, amount_usd: Decimal) -> TradeEvent {
    TradeEvent {
        id: format!("{maker}:{timestamp}"),
        tx_hash: format!("0x{timestamp:064x}"),
        timestamp,
        side: Side::Buy,
        maker_wallet: maker.to_string(),
        amount_usd: Some(amount_usd),
        price_usd: None,
    }
}

/// A buy event carrying a price.
pub fn priced_trade(maker: &str, timestamp: i64, amount_usd: Decimal, price: Decimal) -> TradeEvent {
    TradeEvent {
        price_usd: Some(price),
        ..trade(maker, timestamp, amount_usd)
    }
}

/// `n` events spread over distinct wallets `w0..w{n-1}`.
pub fn make_trades(n: usize, amount_usd: Decimal) -> Vec<TradeEvent> {
    (0..n)
        .map(|i| trade(&format!("w{i}"), i as i64, amount_usd))
        .collect()
}

/// An untimed candidate keyed on `address` and `amount_usd`.
pub fn candidate(address: &str, amount_usd: Decimal) -> CandidateItem {
    CandidateItem {
        key: WatchKey::from_observation(address, amount_usd, 0, 0),
        subject: address.to_uppercase(),
        amount_usd,
        amount_text: format!("${amount_usd}"),
        address: address.to_string(),
        detail_url: None,
    }
}
