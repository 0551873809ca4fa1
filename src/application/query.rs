//! "Who traded this token" workflow.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::aggregate::aggregate_traders;
use super::fetch::EventFetcher;
use crate::domain::{PairId, TimeWindow, TraderReport};
use crate::error::FetchError;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::events::{EventQuery, EventSource, TokenDirectory};

/// Resolves a token, fetches its events over a trailing window and
/// aggregates them per wallet.
pub struct TraderQuery {
    directory: Arc<dyn TokenDirectory>,
    fetcher: EventFetcher,
    clock: Arc<dyn Clock>,
}

impl TraderQuery {
    #[must_use]
    pub fn new(
        directory: Arc<dyn TokenDirectory>,
        events: Arc<dyn EventSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            fetcher: EventFetcher::new(events),
            clock,
        }
    }

    /// Traders of the best match for `phrase` over the last `hours` hours.
    ///
    /// The token's own address is used as the pair id.
    ///
    /// # Errors
    ///
    /// [`FetchError::NotFound`] when no token matches, otherwise whatever the
    /// fetch fails with.
    pub async fn query_traders(
        &self,
        phrase: &str,
        min_usd: Decimal,
        network_id: u64,
        hours: u32,
    ) -> Result<TraderReport, FetchError> {
        let token = self.directory.find_token(phrase, network_id).await?;
        let window = TimeWindow::ending_at(self.clock.now(), hours);

        let query = EventQuery {
            pair_id: PairId::new(token.address.clone()),
            network_id,
            from_ts: window.from,
            to_ts: window.to,
            min_usd: Some(min_usd),
            side: None,
        };
        let events = self.fetcher.fetch_events(&query).await?;
        let traders = aggregate_traders(&events);

        info!(
            symbol = %token.symbol,
            address = %token.address,
            events = events.len(),
            traders = traders.len(),
            hours,
            "Trader query complete"
        );

        Ok(TraderReport {
            token,
            traders,
            total_events: events.len(),
            window,
            min_usd,
        })
    }
}
