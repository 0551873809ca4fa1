//! Per-subscriber monitor state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::seen::SeenSet;
use super::subscriber::SubscriberRecord;
use super::watch::WatchKey;

/// Lifecycle of a monitor task.
///
/// `Idle -> Running -> Stopped`, and `Stopped -> Running` on a fresh start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

/// Point-in-time view of a task for the control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    pub running: bool,
    pub state: MonitorState,
    pub min_usd: Decimal,
    pub poll_interval_secs: u64,
    pub alert_count: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub last_poll_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub seen_keys: usize,
}

/// State of one subscription's polling loop.
///
/// Owns its [`SeenSet`] exclusively. Mutated only by its own loop (through
/// [`MonitorTask::admit`] and [`MonitorTask::finish_tick`]) and by
/// start/stop. Every fresh start bumps `generation`; tick results carrying an
/// older generation are ignored so a tick that outlives a restart cannot
/// touch the new run.
#[derive(Debug, Clone)]
pub struct MonitorTask {
    min_usd: Decimal,
    poll_interval_secs: u64,
    state: MonitorState,
    started_at: Option<DateTime<Utc>>,
    last_poll_at: Option<DateTime<Utc>>,
    alerts_emitted: u64,
    last_error: Option<String>,
    seen: SeenSet,
    generation: u64,
}

impl MonitorTask {
    #[must_use]
    pub fn new(min_usd: Decimal, poll_interval_secs: u64) -> Self {
        Self {
            min_usd,
            poll_interval_secs,
            state: MonitorState::Idle,
            started_at: None,
            last_poll_at: None,
            alerts_emitted: 0,
            last_error: None,
            seen: SeenSet::new(),
            generation: 0,
        }
    }

    /// Move into `Running`. Returns the new generation, or `None` when the
    /// task is already running (nothing is changed in that case).
    pub fn begin(&mut self, min_usd: Decimal, now: DateTime<Utc>) -> Option<u64> {
        if self.state == MonitorState::Running {
            return None;
        }
        self.seen.clear();
        self.min_usd = min_usd;
        self.state = MonitorState::Running;
        self.started_at = Some(now);
        self.last_poll_at = None;
        self.alerts_emitted = 0;
        self.last_error = None;
        self.generation += 1;
        Some(self.generation)
    }

    /// Like [`Self::begin`] but carries persisted counters over.
    pub fn resume(&mut self, record: &SubscriberRecord) -> Option<u64> {
        let generation = self.begin(record.min_usd, record.started_at)?;
        self.last_poll_at = record.last_check;
        self.alerts_emitted = record.alert_count;
        Some(generation)
    }

    /// Move into `Stopped`. Returns `false` if the task was not running.
    pub fn halt(&mut self) -> bool {
        if self.state != MonitorState::Running {
            return false;
        }
        self.state = MonitorState::Stopped;
        true
    }

    /// Record a key for the given run. Returns `true` when the key is new
    /// and the caller should alert on it.
    pub fn admit(&mut self, generation: u64, key: &WatchKey) -> bool {
        if generation != self.generation {
            return false;
        }
        self.seen.insert(key.clone())
    }

    /// Book-keeping at the end of a tick.
    pub fn finish_tick(
        &mut self,
        generation: u64,
        now: DateTime<Utc>,
        alerts: u64,
        error: Option<String>,
    ) {
        if generation != self.generation {
            return;
        }
        self.last_poll_at = Some(now);
        self.alerts_emitted += alerts;
        self.last_error = error;
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[must_use]
    pub fn state(&self) -> MonitorState {
        self.state
    }

    #[must_use]
    pub fn min_usd(&self) -> Decimal {
        self.min_usd
    }

    #[must_use]
    pub fn poll_interval_secs(&self) -> u64 {
        self.poll_interval_secs
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            running: self.state == MonitorState::Running,
            state: self.state,
            min_usd: self.min_usd,
            poll_interval_secs: self.poll_interval_secs,
            alert_count: self.alerts_emitted,
            started_at: self.started_at,
            last_poll_at: self.last_poll_at,
            last_error: self.last_error.clone(),
            seen_keys: self.seen.len(),
        }
    }

    /// Persistable shape, `None` unless running.
    #[must_use]
    pub fn to_record(&self) -> Option<SubscriberRecord> {
        if self.state != MonitorState::Running {
            return None;
        }
        Some(SubscriberRecord {
            min_usd: self.min_usd,
            started_at: self.started_at?,
            last_check: self.last_poll_at,
            alert_count: self.alerts_emitted,
        })
    }
}
