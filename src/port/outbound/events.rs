//! Upstream trade-event query port.
//!
//! This is the paged contract the event fetcher drives. Implementations
//! translate one call into exactly one provider request; they do not loop
//! over pages and they do not retry.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{PairId, Side, TokenInfo, TradeEvent};
use crate::error::FetchError;

/// Parameters shared by every page of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub pair_id: PairId,
    pub network_id: u64,
    /// Inclusive lower bound, unix seconds.
    pub from_ts: i64,
    /// Inclusive upper bound, unix seconds.
    pub to_ts: i64,
    pub min_usd: Option<Decimal>,
    pub side: Option<Side>,
}

/// Continuation information attached to every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// One page of events in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPage {
    pub nodes: Vec<TradeEvent>,
    pub page_info: PageInfo,
}

/// Port for paged event queries.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`); several monitors
/// may query the same source concurrently.
///
/// # Errors
///
/// Failures are classified as [`FetchError::Auth`], [`FetchError::Transient`]
/// or [`FetchError::Protocol`].
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch a single page.
    ///
    /// # Arguments
    ///
    /// * `query` - Filter shared across pages.
    /// * `limit` - Page size requested from the provider.
    /// * `cursor` - Continuation token from the previous page, `None` for the first.
    async fn request(
        &self,
        query: &EventQuery,
        limit: usize,
        cursor: Option<&str>,
    ) -> Result<EventPage, FetchError>;
}

/// Port for resolving a search phrase to a token.
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    /// Best match for `phrase` on `network_id`.
    ///
    /// # Errors
    ///
    /// [`FetchError::NotFound`] when nothing matches.
    async fn find_token(&self, phrase: &str, network_id: u64) -> Result<TokenInfo, FetchError>;
}
