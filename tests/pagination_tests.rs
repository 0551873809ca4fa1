use std::sync::Arc;

use rust_decimal_macros::dec;

use tradewatch::application::fetch::{EventFetcher, PAGE_SIZE};
use tradewatch::domain::PairId;
use tradewatch::error::FetchError;
use tradewatch::port::EventQuery;
use tradewatch::testkit::domain::make_trades;
use tradewatch::testkit::source::PagedEventSource;

fn query() -> EventQuery {
    EventQuery {
        pair_id: PairId::new("0xpair"),
        network_id: 1,
        from_ts: 1_700_000_000,
        to_ts: 1_700_086_400,
        min_usd: Some(dec!(1000)),
        side: None,
    }
}

fn expected_requests(total: usize) -> u32 {
    u32::try_from(total.div_ceil(PAGE_SIZE).max(1)).unwrap()
}

#[tokio::test]
async fn fetch_issues_ceil_pages_and_keeps_order() {
    for total in [0, 1, 199, 200, 201, 450, 1000] {
        let events = make_trades(total, dec!(1500));
        let source = Arc::new(PagedEventSource::new(events.clone()));
        let fetcher = EventFetcher::new(source.clone());

        let fetched = fetcher.fetch_events(&query()).await.unwrap();

        assert_eq!(fetched, events, "total {total}");
        assert_eq!(source.request_count(), expected_requests(total), "total {total}");
    }
}

#[tokio::test]
async fn cursor_from_each_page_is_sent_with_the_next() {
    let source = Arc::new(PagedEventSource::new(make_trades(450, dec!(1))));
    let fetcher = EventFetcher::new(source.clone());

    fetcher.fetch_events(&query()).await.unwrap();

    assert_eq!(
        source.cursors(),
        vec![None, Some("200".to_string()), Some("400".to_string())]
    );
}

#[tokio::test]
async fn failing_page_discards_partial_results() {
    let source = Arc::new(
        PagedEventSource::new(make_trades(450, dec!(1)))
            .fail_on(2, FetchError::Transient("connection reset".into())),
    );
    let fetcher = EventFetcher::new(source.clone());

    let err = fetcher.fetch_events(&query()).await.unwrap_err();

    assert_eq!(err, FetchError::Transient("connection reset".into()));
    assert!(err.is_retryable());
    assert_eq!(source.request_count(), 2);
}

#[test]
fn auth_failure_on_first_page_is_not_retryable() {
    let source = Arc::new(
        PagedEventSource::new(make_trades(10, dec!(1)))
            .fail_on(1, FetchError::Auth("invalid key".into())),
    );
    let fetcher = EventFetcher::new(source.clone());

    let err = tokio_test::block_on(fetcher.fetch_events(&query())).unwrap_err();

    assert!(matches!(err, FetchError::Auth(_)));
    assert!(!err.is_retryable());
    assert_eq!(source.request_count(), 1);
}
