use std::sync::Arc;
use std::time::Duration;

use tradewatch::application::monitor::{MonitorRegistry, MonitorSettings};
use tradewatch::domain::SubscriberId;
use tradewatch::testkit::clock::ManualClock;
use tradewatch::testkit::sink::RecordingSink;
use tradewatch::testkit::source::ScriptedCandidateSource;

pub const INTERVAL_SECS: u64 = 30;

pub fn registry(source: &ScriptedCandidateSource, sink: &RecordingSink) -> MonitorRegistry {
    MonitorRegistry::new(
        Arc::new(source.clone()),
        Arc::new(sink.clone()),
        Arc::new(ManualClock::default()),
        MonitorSettings {
            poll_interval_secs: INTERVAL_SECS,
            enrich: false,
            sample_wallets: 3,
        },
    )
}

pub fn sub(id: &str) -> SubscriberId {
    SubscriberId::new(id)
}

/// Let spawned loops run through `ticks` further intervals (0 = only the
/// immediate first tick). Requires paused time.
pub async fn run_ticks(ticks: u64) {
    tokio::time::sleep(Duration::from_secs(INTERVAL_SECS * ticks) + Duration::from_millis(1)).await;
}
