use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rust_decimal_macros::dec;

use super::*;
use crate::domain::{MonitorState, MonitorTask, SampleWallet, SubscriberBook, SubscriberId, SubscriberRecord};
use crate::error::{ControlError, FetchError};
use crate::port::inbound::control::MonitorControl;
use crate::testkit::clock::ManualClock;
use crate::testkit::domain::candidate;
use crate::testkit::sink::RecordingSink;
use crate::testkit::source::ScriptedCandidateSource;

fn registry(source: &ScriptedCandidateSource, sink: &RecordingSink) -> MonitorRegistry {
    MonitorRegistry::new(
        Arc::new(source.clone()),
        Arc::new(sink.clone()),
        Arc::new(ManualClock::default()),
        MonitorSettings::default(),
    )
}

fn context(source: &ScriptedCandidateSource, sink: &RecordingSink, enrich: bool) -> TickContext {
    TickContext {
        source: Arc::new(source.clone()),
        sink: Arc::new(sink.clone()),
        clock: Arc::new(ManualClock::default()),
        enrich,
        sample_limit: DEFAULT_SAMPLE_WALLETS,
    }
}

fn running_task(min_usd: rust_decimal::Decimal) -> (Mutex<MonitorTask>, u64) {
    let mut task = MonitorTask::new(min_usd, DEFAULT_POLL_INTERVAL_SECS);
    let generation = task
        .begin(min_usd, chrono::Utc::now())
        .expect("fresh task starts");
    (Mutex::new(task), generation)
}

/// Let spawned loops run until the paused clock reaches `secs` from now.
async fn advance(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs) + Duration::from_millis(1)).await;
}

fn sub(id: &str) -> SubscriberId {
    SubscriberId::new(id)
}

// ---------------------------------------------------------------------------
// run_tick
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tick_alerts_new_keys_in_discovery_order() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![
        candidate("0xaaa", dec!(5000)),
        candidate("0xbbb", dec!(1200)),
    ])]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    let outcome = run_tick(&ctx, &sub("s"), &task, generation).await;

    assert_eq!(outcome.alerts, 2);
    assert!(outcome.error.is_none());
    let subjects: Vec<_> = sink.alerts().into_iter().map(|a| a.address).collect();
    assert_eq!(subjects, vec!["0xaaa", "0xbbb"]);
    assert_eq!(task.lock().status().alert_count, 2);
    assert_eq!(source.released(), 1);
}

#[tokio::test]
async fn tick_alerts_duplicates_within_snapshot_once() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![
        candidate("0xaaa", dec!(5000)),
        candidate("0xaaa", dec!(5000)),
    ])]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    run_tick(&ctx, &sub("s"), &task, generation).await;

    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn tick_passes_threshold_and_ignores_items_below_it() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![
        candidate("0xaaa", dec!(999.99)),
        candidate("0xbbb", dec!(1000)),
    ])]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    run_tick(&ctx, &sub("s"), &task, generation).await;

    assert_eq!(source.thresholds(), vec![dec!(1000)]);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.alerts()[0].address, "0xbbb");
}

#[tokio::test]
async fn tick_snapshot_failure_is_recorded_not_raised() {
    let source = ScriptedCandidateSource::new()
        .with_snapshots(vec![Err(FetchError::Transient("page timed out".into()))]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    let outcome = run_tick(&ctx, &sub("s"), &task, generation).await;

    assert_eq!(outcome.error, Some(FetchError::Transient("page timed out".into())));
    assert!(sink.is_empty());
    let status = task.lock().status();
    assert!(status.last_error.is_some());
    assert!(status.last_poll_at.is_some());
    assert_eq!(source.released(), 1);
}

#[tokio::test]
async fn tick_open_failure_skips_release() {
    let source = ScriptedCandidateSource::new()
        .with_open_results(vec![Err(FetchError::Transient("browser crashed".into()))]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    let outcome = run_tick(&ctx, &sub("s"), &task, generation).await;

    assert!(outcome.error.is_some());
    assert_eq!(source.opened(), 1);
    assert_eq!(source.released(), 0);
}

#[tokio::test]
async fn tick_attaches_samples_when_enriching() {
    let samples = vec![
        SampleWallet { wallet: "w1".into(), total_usd: dec!(900), orders: 3 },
        SampleWallet { wallet: "w2".into(), total_usd: dec!(800), orders: 2 },
        SampleWallet { wallet: "w3".into(), total_usd: dec!(700), orders: 1 },
        SampleWallet { wallet: "w4".into(), total_usd: dec!(600), orders: 1 },
    ];
    let source = ScriptedCandidateSource::new()
        .with_snapshots(vec![Ok(vec![candidate("0xaaa", dec!(5000))])])
        .with_samples(Ok(samples));
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, true);
    let (task, generation) = running_task(dec!(1000));

    run_tick(&ctx, &sub("s"), &task, generation).await;

    let alert = &sink.alerts()[0];
    assert_eq!(alert.sample_wallets.len(), 3);
    assert_eq!(alert.sample_wallets[0].wallet, "w1");
}

#[tokio::test]
async fn tick_enrichment_failure_still_alerts() {
    let source = ScriptedCandidateSource::new()
        .with_snapshots(vec![Ok(vec![candidate("0xaaa", dec!(5000))])])
        .with_samples(Err(FetchError::Protocol("detail page changed".into())));
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, true);
    let (task, generation) = running_task(dec!(1000));

    let outcome = run_tick(&ctx, &sub("s"), &task, generation).await;

    assert!(outcome.error.is_none());
    assert_eq!(sink.len(), 1);
    assert!(sink.alerts()[0].sample_wallets.is_empty());
}

#[tokio::test]
async fn tick_keeps_seen_set_bounded() {
    let items = (0..120)
        .map(|i| candidate(&format!("0x{i:03}"), dec!(2000)))
        .collect();
    let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(items)]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);
    let (task, generation) = running_task(dec!(1000));

    run_tick(&ctx, &sub("s"), &task, generation).await;

    assert_eq!(sink.len(), 120);
    // 101st insert trims to 50, then 19 more.
    assert_eq!(task.lock().seen().len(), 69);
}

#[tokio::test]
async fn tick_delta_ignores_keys_evicted_by_its_own_inserts() {
    let (task, generation) = running_task(dec!(1000));
    for i in 0..100 {
        let key = candidate(&format!("0x{i:03}"), dec!(2000)).key;
        assert!(task.lock().admit(generation, &key));
    }
    let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![
        candidate("0xnew", dec!(2000)),
        candidate("0x000", dec!(2000)),
    ])]);
    let sink = RecordingSink::new();
    let ctx = context(&source, &sink, false);

    let outcome = run_tick(&ctx, &sub("s"), &task, generation).await;

    let addresses: Vec<_> = sink.alerts().into_iter().map(|a| a.address).collect();
    assert_eq!(addresses, vec!["0xnew"]);
    assert_eq!(outcome.alerts, 1);
    assert_eq!(task.lock().seen().len(), 50);
}

// ---------------------------------------------------------------------------
// MonitorRegistry
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn second_tick_alerts_only_new_items() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![
        Ok(vec![candidate("0xaaa", dec!(5000)), candidate("0xbbb", dec!(1200))]),
        Ok(vec![candidate("0xaaa", dec!(5000)), candidate("0xccc", dec!(3000))]),
    ]);
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    advance(0).await;
    assert_eq!(sink.len(), 2);

    advance(DEFAULT_POLL_INTERVAL_SECS).await;
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.alerts()[2].address, "0xccc");
    assert_eq!(registry.status(&sub("s")).unwrap().alert_count, 3);

    registry.shutdown_all().await;
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_realerts_previous_items() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![
        Ok(vec![candidate("0xaaa", dec!(5000))]),
        Ok(vec![candidate("0xaaa", dec!(5000))]),
    ]);
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    advance(0).await;
    registry.stop(&sub("s")).unwrap();
    assert_eq!(registry.status(&sub("s")).unwrap().state, MonitorState::Stopped);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    advance(0).await;

    assert_eq!(sink.len(), 2);
    registry.shutdown_all().await;
}

#[tokio::test(start_paused = true)]
async fn failing_tick_does_not_stop_the_loop() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![
        Err(FetchError::Transient("timeout".into())),
        Ok(vec![candidate("0xaaa", dec!(5000))]),
    ]);
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    advance(0).await;
    let status = registry.status(&sub("s")).unwrap();
    assert!(status.running);
    assert!(status.last_error.is_some());
    assert!(sink.is_empty());

    advance(DEFAULT_POLL_INTERVAL_SECS).await;
    let status = registry.status(&sub("s")).unwrap();
    assert!(status.running);
    assert!(status.last_error.is_none());
    assert_eq!(sink.len(), 1);
    assert_eq!(source.opened(), source.released());

    registry.shutdown_all().await;
}

#[tokio::test(start_paused = true)]
async fn start_while_running_is_rejected() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    let err = registry.start(&sub("s"), dec!(50)).await.unwrap_err();

    assert!(matches!(err, ControlError::AlreadyRunning { .. }));
    assert_eq!(registry.status(&sub("s")).unwrap().min_usd, dec!(1000));
    registry.shutdown_all().await;
}

#[tokio::test]
async fn negative_threshold_is_rejected() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    let err = registry.start(&sub("s"), dec!(-1)).await.unwrap_err();

    assert!(matches!(err, ControlError::InvalidThreshold { .. }));
    assert!(registry.status(&sub("s")).is_none());
}

#[tokio::test(start_paused = true)]
async fn stop_when_not_running_is_rejected() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    let err = registry.stop(&sub("nobody")).unwrap_err();
    assert!(matches!(err, ControlError::NotRunning { .. }));

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    registry.stop(&sub("s")).unwrap();
    let err = registry.stop(&sub("s")).unwrap_err();
    assert!(matches!(err, ControlError::NotRunning { .. }));
}

#[tokio::test(start_paused = true)]
async fn stopped_monitor_stops_polling() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    advance(0).await;
    registry.stop(&sub("s")).unwrap();
    let opened = source.opened();

    advance(DEFAULT_POLL_INTERVAL_SECS * 3).await;
    assert_eq!(source.opened(), opened);
}

#[tokio::test(start_paused = true)]
async fn monitors_are_independent() {
    let source = ScriptedCandidateSource::new().with_snapshots(vec![
        Ok(vec![candidate("0xaaa", dec!(5000))]),
        Ok(vec![candidate("0xaaa", dec!(5000))]),
    ]);
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("a"), dec!(1000)).await.unwrap();
    registry.start(&sub("b"), dec!(1000)).await.unwrap();
    advance(0).await;

    assert_eq!(sink.len(), 2);
    let mut subscribers: Vec<_> = sink.alerts().into_iter().map(|a| a.subscriber).collect();
    subscribers.sort();
    assert_eq!(subscribers, vec![sub("a"), sub("b")]);
    registry.shutdown_all().await;
}

#[tokio::test(start_paused = true)]
async fn export_and_resume_carry_counters() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    let mut book = SubscriberBook::new();
    book.insert(
        sub("chat-1"),
        SubscriberRecord {
            min_usd: dec!(2500),
            started_at: chrono::Utc::now(),
            last_check: None,
            alert_count: 7,
        },
    );

    assert_eq!(registry.resume(&book), 1);
    assert_eq!(registry.resume(&book), 0);

    let status = registry.status(&sub("chat-1")).unwrap();
    assert!(status.running);
    assert_eq!(status.min_usd, dec!(2500));
    assert_eq!(status.alert_count, 7);

    registry.shutdown_all().await;
    let exported = registry.export();
    assert_eq!(exported.get(&sub("chat-1")).unwrap().alert_count, 7);
    assert!(exported.updated_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn unsubscribe_forgets_the_task() {
    let source = ScriptedCandidateSource::new();
    let sink = RecordingSink::new();
    let registry = registry(&source, &sink);

    registry.start(&sub("s"), dec!(1000)).await.unwrap();
    assert!(registry.unsubscribe(&sub("s")));
    assert!(!registry.unsubscribe(&sub("s")));
    assert!(registry.status(&sub("s")).is_none());
    assert!(registry.export().is_empty());
    assert!(registry.list().is_empty());
}
