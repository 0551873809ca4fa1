//! Monitor registry: one task per subscriber, one loop per running task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::tick::{run_tick, TickContext};
use super::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SAMPLE_WALLETS};
use crate::domain::{MonitorStatus, MonitorTask, SubscriberBook, SubscriberId};
use crate::error::ControlError;
use crate::port::inbound::control::MonitorControl;
use crate::port::outbound::candidate::CandidateSource;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::sink::AlertSink;

/// Tunables applied to every monitor the registry starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub poll_interval_secs: u64,
    pub enrich: bool,
    pub sample_wallets: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            enrich: true,
            sample_wallets: DEFAULT_SAMPLE_WALLETS,
        }
    }
}

struct Entry {
    task: Arc<Mutex<MonitorTask>>,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

/// Owns every subscriber's [`MonitorTask`] and the tokio task polling it.
///
/// Tasks are independent: they share the tick collaborators but no mutable
/// state. Must be used from within a tokio runtime.
pub struct MonitorRegistry {
    ctx: Arc<TickContext>,
    poll_interval_secs: u64,
    entries: Mutex<HashMap<SubscriberId, Entry>>,
}

impl MonitorRegistry {
    #[must_use]
    pub fn new(
        source: Arc<dyn CandidateSource>,
        sink: Arc<dyn AlertSink>,
        clock: Arc<dyn Clock>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            ctx: Arc::new(TickContext {
                source,
                sink,
                clock,
                enrich: settings.enrich,
                sample_limit: settings.sample_wallets,
            }),
            poll_interval_secs: settings.poll_interval_secs.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Remove a subscriber entirely, stopping its loop if it runs.
    /// Returns `false` for an unknown subscriber.
    pub fn unsubscribe(&self, subscriber: &SubscriberId) -> bool {
        let Some(entry) = self.entries.lock().remove(subscriber) else {
            return false;
        };
        entry.task.lock().halt();
        entry.shutdown.send_replace(true);
        info!(subscriber = %subscriber, "Subscriber removed");
        true
    }

    /// Status of every known subscriber, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<(SubscriberId, MonitorStatus)> {
        let entries = self.entries.lock();
        let mut out: Vec<_> = entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.task.lock().status()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Persistable view of all running subscribers.
    #[must_use]
    pub fn export(&self) -> SubscriberBook {
        let mut book = SubscriberBook::new();
        for (id, entry) in self.entries.lock().iter() {
            if let Some(record) = entry.task.lock().to_record() {
                book.insert(id.clone(), record);
            }
        }
        book.updated_at = Some(self.ctx.clock.now());
        book
    }

    /// Restart every subscriber in `book` that is not already running.
    /// Returns how many monitors were started.
    pub fn resume(&self, book: &SubscriberBook) -> usize {
        let mut entries = self.entries.lock();
        let mut resumed = 0;

        for (id, record) in &book.subscribers {
            let entry = entries
                .entry(id.clone())
                .or_insert_with(|| self.new_entry(record.min_usd));
            let generation = entry.task.lock().resume(record);
            if let Some(generation) = generation {
                self.launch(id, entry, generation);
                resumed += 1;
            }
        }

        if resumed > 0 {
            info!(count = resumed, "Resumed subscribers");
        }
        resumed
    }

    /// Stop every loop and wait for in-flight ticks to finish.
    ///
    /// Task state is left as it was so a later [`Self::export`] still lists
    /// the subscribers that were running.
    pub async fn shutdown_all(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut entries = self.entries.lock();
            entries
                .values_mut()
                .filter_map(|entry| {
                    entry.shutdown.send_replace(true);
                    entry.handle.take()
                })
                .collect()
        };

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Monitor loop ended abnormally");
            }
        }
    }

    fn new_entry(&self, min_usd: Decimal) -> Entry {
        Entry {
            task: Arc::new(Mutex::new(MonitorTask::new(min_usd, self.poll_interval_secs))),
            shutdown: watch::channel(false).0,
            handle: None,
        }
    }

    /// Spawn the loop for a freshly begun run.
    ///
    /// The previous loop, if any, is signalled and the new loop awaits it
    /// before its first tick, so two loops never tick the same task.
    fn launch(&self, subscriber: &SubscriberId, entry: &mut Entry, generation: u64) {
        let (tx, rx) = watch::channel(false);
        let previous_tx = std::mem::replace(&mut entry.shutdown, tx);
        previous_tx.send_replace(true);
        let previous = entry.handle.take();

        entry.handle = Some(tokio::spawn(run_loop(
            Arc::clone(&self.ctx),
            subscriber.clone(),
            Arc::clone(&entry.task),
            generation,
            Duration::from_secs(self.poll_interval_secs),
            rx,
            previous,
        )));
    }
}

#[async_trait]
impl MonitorControl for MonitorRegistry {
    async fn start(&self, subscriber: &SubscriberId, min_usd: Decimal) -> Result<(), ControlError> {
        if min_usd.is_sign_negative() {
            return Err(ControlError::InvalidThreshold {
                subscriber: subscriber.clone(),
                reason: format!("{min_usd} is negative"),
            });
        }

        let now = self.ctx.clock.now();
        let mut entries = self.entries.lock();
        let entry = entries
            .entry(subscriber.clone())
            .or_insert_with(|| self.new_entry(min_usd));

        let generation = entry.task.lock().begin(min_usd, now);
        let Some(generation) = generation else {
            return Err(ControlError::AlreadyRunning {
                subscriber: subscriber.clone(),
            });
        };

        self.launch(subscriber, entry, generation);
        info!(subscriber = %subscriber, min_usd = %min_usd, "Monitor started");
        Ok(())
    }

    fn stop(&self, subscriber: &SubscriberId) -> Result<(), ControlError> {
        let entries = self.entries.lock();
        let halted = entries
            .get(subscriber)
            .map(|entry| (entry.task.lock().halt(), entry));

        match halted {
            Some((true, entry)) => {
                entry.shutdown.send_replace(true);
                info!(subscriber = %subscriber, "Monitor stopped");
                Ok(())
            }
            _ => Err(ControlError::NotRunning {
                subscriber: subscriber.clone(),
            }),
        }
    }

    fn status(&self, subscriber: &SubscriberId) -> Option<MonitorStatus> {
        self.entries
            .lock()
            .get(subscriber)
            .map(|entry| entry.task.lock().status())
    }
}

async fn run_loop(
    ctx: Arc<TickContext>,
    subscriber: SubscriberId,
    task: Arc<Mutex<MonitorTask>>,
    generation: u64,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    previous: Option<JoinHandle<()>>,
) {
    if let Some(previous) = previous {
        if let Err(e) = previous.await {
            warn!(subscriber = %subscriber, error = %e, "Previous monitor loop ended abnormally");
        }
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(subscriber = %subscriber, generation, "Monitor loop started");

    loop {
        tokio::select! {
            biased;
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                let current = task.lock().is_current(generation);
                if !current {
                    break;
                }
                run_tick(&ctx, &subscriber, &task, generation).await;
            }
        }
    }

    debug!(subscriber = %subscriber, generation, "Monitor loop exited");
}
