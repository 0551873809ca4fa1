//! Per-wallet aggregation of trade events.
//!
//! Output is deterministic: descending by rounded `total_usd`, ties broken
//! by wallet ascending.
//!
//! The running average divides by the count of *all* events seen for the
//! wallet, priced or not, while only priced events move it. With unpriced
//! events interleaved, `avg_price_usd` is therefore not the mean of the
//! priced events. Kept that way on purpose so numbers match what users have
//! been seeing; see DESIGN.md before changing it.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{SampleWallet, TradeEvent, TraderSummary};

struct Accumulator {
    count: u64,
    total: Decimal,
    avg: Decimal,
    priced: bool,
    first: i64,
    last: i64,
}

impl Accumulator {
    fn new(ts: i64) -> Self {
        Self {
            count: 0,
            total: Decimal::ZERO,
            avg: Decimal::ZERO,
            priced: false,
            first: ts,
            last: ts,
        }
    }

    fn push(&mut self, event: &TradeEvent) {
        self.count += 1;
        self.total = self.total.saturating_add(event.amount_or_zero());

        if let Some(price) = event.usable_price() {
            let n = Decimal::from(self.count);
            self.avg = self.avg.saturating_add(price.saturating_sub(self.avg) / n);
            self.priced = true;
        }

        self.first = self.first.min(event.timestamp);
        self.last = self.last.max(event.timestamp);
    }
}

/// Reduce `events` to one summary per maker wallet.
#[must_use]
pub fn aggregate_traders(events: &[TradeEvent]) -> Vec<TraderSummary> {
    let mut by_wallet: HashMap<&str, Accumulator> = HashMap::new();

    for event in events {
        by_wallet
            .entry(event.maker_wallet.as_str())
            .or_insert_with(|| Accumulator::new(event.timestamp))
            .push(event);
    }

    let mut summaries: Vec<TraderSummary> = by_wallet
        .into_iter()
        .map(|(wallet, acc)| TraderSummary {
            wallet: wallet.to_string(),
            order_count: acc.count,
            total_usd: acc
                .total
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            avg_price_usd: acc.priced.then_some(acc.avg),
            first_seen: acc.first,
            last_seen: acc.last,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_usd
            .cmp(&a.total_usd)
            .then_with(|| a.wallet.cmp(&b.wallet))
    });
    summaries
}

/// The `limit` largest wallets in `events`, as alert samples.
#[must_use]
pub fn top_wallets(events: &[TradeEvent], limit: usize) -> Vec<SampleWallet> {
    aggregate_traders(events)
        .iter()
        .take(limit)
        .map(SampleWallet::from)
        .collect()
}
