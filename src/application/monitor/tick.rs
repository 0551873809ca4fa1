//! A single monitor poll.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{Alert, CandidateItem, MonitorTask, SubscriberId};
use crate::error::FetchError;
use crate::port::outbound::candidate::{CandidateSession, CandidateSource};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::sink::AlertSink;

/// Collaborators shared by every tick of every monitor.
pub struct TickContext {
    pub source: Arc<dyn CandidateSource>,
    pub sink: Arc<dyn AlertSink>,
    pub clock: Arc<dyn Clock>,
    /// Attach sample wallets to alerts.
    pub enrich: bool,
    pub sample_limit: usize,
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub candidates: usize,
    pub alerts: u64,
    pub error: Option<FetchError>,
}

/// Run one poll for `subscriber`.
///
/// Never fails: errors are logged, recorded on the task as `last_error` and
/// returned in the outcome. The session is released on every path. Nothing
/// is recorded if the task has been restarted since `generation` was issued.
pub async fn run_tick(
    ctx: &TickContext,
    subscriber: &SubscriberId,
    task: &Mutex<MonitorTask>,
    generation: u64,
) -> TickOutcome {
    let min_usd = task.lock().min_usd();

    let outcome = match ctx.source.open_session().await {
        Ok(mut session) => {
            let outcome = poll(ctx, subscriber, task, generation, session.as_mut(), min_usd).await;
            session.release().await;
            outcome
        }
        Err(e) => TickOutcome {
            error: Some(e),
            ..TickOutcome::default()
        },
    };

    if let Some(e) = &outcome.error {
        warn!(
            subscriber = %subscriber,
            source = ctx.source.source_name(),
            error = %e,
            "Monitor tick failed"
        );
    } else {
        debug!(
            subscriber = %subscriber,
            candidates = outcome.candidates,
            alerts = outcome.alerts,
            "Monitor tick complete"
        );
    }

    task.lock().finish_tick(
        generation,
        ctx.clock.now(),
        outcome.alerts,
        outcome.error.as_ref().map(ToString::to_string),
    );
    outcome
}

async fn poll(
    ctx: &TickContext,
    subscriber: &SubscriberId,
    task: &Mutex<MonitorTask>,
    generation: u64,
    session: &mut dyn CandidateSession,
    min_usd: Decimal,
) -> TickOutcome {
    let candidates = match session.snapshot(min_usd).await {
        Ok(items) => items,
        Err(e) => {
            return TickOutcome {
                error: Some(e),
                ..TickOutcome::default()
            }
        }
    };

    let mut outcome = TickOutcome {
        candidates: candidates.len(),
        ..TickOutcome::default()
    };

    // Delta is fixed before any insert, so compaction cannot re-admit a key.
    let delta: Vec<CandidateItem> = {
        let state = task.lock();
        let mut batch = HashSet::new();
        candidates
            .into_iter()
            .filter(|item| item.amount_usd >= min_usd)
            .filter(|item| !state.seen().contains(&item.key) && batch.insert(item.key.clone()))
            .collect()
    };

    for item in delta {
        let admitted = task.lock().admit(generation, &item.key);
        if !admitted {
            continue;
        }

        let samples = if ctx.enrich {
            match session.sample_wallets(&item, ctx.sample_limit).await {
                Ok(samples) => samples,
                Err(e) => {
                    debug!(key = %item.key, error = %e, "Enrichment failed, alerting without samples");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        ctx.sink.deliver(Alert::from_candidate(
            subscriber.clone(),
            item,
            samples,
            ctx.clock.now(),
        ));
        outcome.alerts += 1;
    }

    outcome
}
