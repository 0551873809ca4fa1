//! Candidate source backed by recent trade events.
//!
//! Each snapshot fetches the last `lookback_secs` of events for every
//! watched pair and turns each event at or above the threshold into a
//! candidate. The session keeps those events so enrichment can rank the
//! most active wallets of the candidate's pair over the same lookback window
//! without another request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::application::aggregate::top_wallets;
use crate::application::fetch::EventFetcher;
use crate::domain::{CandidateItem, PairId, SampleWallet, TradeEvent, WatchKey};
use crate::error::FetchError;
use crate::port::outbound::candidate::{CandidateSession, CandidateSource};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::events::{EventQuery, EventSource};

/// One pair to watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub pair_id: PairId,
    pub network_id: u64,
    /// Shown as the alert subject; defaults to the pair id.
    pub label: Option<String>,
    /// Link template; `{pair}` and `{tx}` are substituted.
    pub detail_url: Option<String>,
}

impl WatchTarget {
    fn subject(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.pair_id.as_str().to_string())
    }

    fn detail_url(&self, tx_hash: &str) -> Option<String> {
        self.detail_url.as_ref().map(|template| {
            template
                .replace("{pair}", self.pair_id.as_str())
                .replace("{tx}", tx_hash)
        })
    }
}

/// Candidate source over an [`EventSource`].
pub struct EventCandidateSource {
    fetcher: EventFetcher,
    clock: Arc<dyn Clock>,
    targets: Arc<[WatchTarget]>,
    lookback_secs: i64,
    time_bucket_secs: u64,
}

impl EventCandidateSource {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventSource>,
        clock: Arc<dyn Clock>,
        targets: Vec<WatchTarget>,
        lookback_secs: u64,
        time_bucket_secs: u64,
    ) -> Self {
        Self {
            fetcher: EventFetcher::new(events),
            clock,
            targets: targets.into(),
            lookback_secs: i64::try_from(lookback_secs).unwrap_or(i64::MAX),
            time_bucket_secs,
        }
    }
}

#[async_trait]
impl CandidateSource for EventCandidateSource {
    async fn open_session(&self) -> Result<Box<dyn CandidateSession>, FetchError> {
        Ok(Box::new(EventSession {
            fetcher: self.fetcher.clone(),
            targets: Arc::clone(&self.targets),
            now: self.clock.now().timestamp(),
            lookback_secs: self.lookback_secs,
            time_bucket_secs: self.time_bucket_secs,
            cache: HashMap::new(),
        }))
    }

    fn source_name(&self) -> &'static str {
        "codex-events"
    }
}

struct EventSession {
    fetcher: EventFetcher,
    targets: Arc<[WatchTarget]>,
    now: i64,
    lookback_secs: i64,
    time_bucket_secs: u64,
    /// Events of this session keyed by lowercased pair address.
    cache: HashMap<String, Vec<TradeEvent>>,
}

#[async_trait]
impl CandidateSession for EventSession {
    async fn snapshot(&mut self, min_usd: Decimal) -> Result<Vec<CandidateItem>, FetchError> {
        let mut items = Vec::new();
        let mut first_error = None;
        let mut succeeded = 0usize;

        for target in self.targets.iter() {
            let query = EventQuery {
                pair_id: target.pair_id.clone(),
                network_id: target.network_id,
                from_ts: self.now.saturating_sub(self.lookback_secs),
                to_ts: self.now,
                min_usd: Some(min_usd),
                side: None,
            };

            let events = match self.fetcher.fetch_events(&query).await {
                Ok(events) => events,
                Err(e) => {
                    warn!(pair = %target.pair_id, error = %e, "Skipping pair for this snapshot");
                    first_error.get_or_insert(e);
                    continue;
                }
            };
            succeeded += 1;

            for event in &events {
                let amount = event.amount_or_zero();
                if amount < min_usd {
                    continue;
                }
                items.push(CandidateItem {
                    key: WatchKey::from_observation(
                        target.pair_id.as_str(),
                        amount,
                        event.timestamp,
                        self.time_bucket_secs,
                    ),
                    subject: target.subject(),
                    amount_usd: amount,
                    amount_text: format_usd(amount),
                    address: target.pair_id.as_str().to_string(),
                    detail_url: target.detail_url(&event.tx_hash),
                });
            }

            self.cache
                .insert(target.pair_id.as_str().to_ascii_lowercase(), events);
        }

        match first_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(items),
        }
    }

    /// Ranks every wallet of the item's pair in this session's window.
    async fn sample_wallets(
        &mut self,
        item: &CandidateItem,
        limit: usize,
    ) -> Result<Vec<SampleWallet>, FetchError> {
        let events = self
            .cache
            .get(&item.address.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(top_wallets(events, limit))
    }

    async fn release(&mut self) {
        debug!(pairs = self.cache.len(), "Releasing event session");
        self.cache.clear();
    }
}

/// `$1,234.50` style rendering, two decimals, thousands separated.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}
