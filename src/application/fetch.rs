//! Pagination-complete event retrieval.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::TradeEvent;
use crate::error::FetchError;
use crate::port::outbound::events::{EventQuery, EventSource};

/// Events requested per page. Fixed by provider convention.
pub const PAGE_SIZE: usize = 200;

/// Retrieves every event matching a query by following the provider's
/// continuation cursor.
///
/// Stateless between calls. A failing page aborts the whole fetch and
/// nothing collected so far is returned; retrying is the caller's business.
#[derive(Clone)]
pub struct EventFetcher {
    source: Arc<dyn EventSource>,
}

impl EventFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    /// Fetch all events for `query`, in provider order.
    ///
    /// # Errors
    ///
    /// Propagates the first page failure unchanged. A page that claims more
    /// data without supplying a fresh cursor is a [`FetchError::Protocol`].
    pub async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<TradeEvent>, FetchError> {
        let mut events = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .request(query, PAGE_SIZE, cursor.as_deref())
                .await
                .inspect_err(|e| {
                    warn!(
                        pair = %query.pair_id,
                        page = pages + 1,
                        error = %e,
                        "Event page request failed"
                    );
                })?;
            pages += 1;
            events.extend(page.nodes);

            if !page.page_info.has_next_page {
                break;
            }

            match page.page_info.end_cursor {
                Some(next) if !next.is_empty() && cursor.as_deref() != Some(next.as_str()) => {
                    cursor = Some(next);
                }
                Some(_) => {
                    return Err(FetchError::Protocol(format!(
                        "page {pages} repeated or blanked its cursor"
                    )));
                }
                None => {
                    return Err(FetchError::Protocol(format!(
                        "page {pages} has a next page but no cursor"
                    )));
                }
            }
        }

        debug!(
            pair = %query.pair_id,
            pages,
            events = events.len(),
            "Fetched trade events"
        );
        Ok(events)
    }
}
