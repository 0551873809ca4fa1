//! Scripted provider ports for testing.
//!
//! - [`PagedEventSource`] - Serves a fixed event list in cursor pages.
//!   Best for: pagination completeness, page failure propagation.
//!
//! - [`StaticTokenDirectory`] - Phrase-to-token lookup table.
//!
//! - [`ScriptedCandidateSource`] - Pre-loaded per-tick snapshots.
//!   Best for: dedup, lifecycle and fail-open tick behavior.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{CandidateItem, SampleWallet, TokenInfo, TradeEvent};
use crate::error::FetchError;
use crate::port::outbound::candidate::{CandidateSession, CandidateSource};
use crate::port::outbound::events::{EventPage, EventQuery, EventSource, PageInfo, TokenDirectory};

// ---------------------------------------------------------------------------
// PagedEventSource
// ---------------------------------------------------------------------------

/// Serves `events` in pages of the requested size.
///
/// Cursors are the decimal offset of the next page. A failure can be
/// scripted for a given 1-based request number.
pub struct PagedEventSource {
    events: Vec<TradeEvent>,
    failures: Mutex<HashMap<u32, FetchError>>,
    requests: Arc<AtomicU32>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl PagedEventSource {
    pub fn new(events: Vec<TradeEvent>) -> Self {
        Self {
            events,
            failures: Mutex::new(HashMap::new()),
            requests: Arc::new(AtomicU32::new(0)),
            cursors: Mutex::new(Vec::new()),
        }
    }

    /// Fail the `nth` request (1-based) with `error`.
    pub fn fail_on(self, nth: u32, error: FetchError) -> Self {
        self.failures.lock().insert(nth, error);
        self
    }

    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Cursors received, one entry per request.
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().clone()
    }
}

#[async_trait]
impl EventSource for PagedEventSource {
    async fn request(
        &self,
        _query: &EventQuery,
        limit: usize,
        cursor: Option<&str>,
    ) -> Result<EventPage, FetchError> {
        let nth = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        self.cursors.lock().push(cursor.map(str::to_string));

        if let Some(error) = self.failures.lock().remove(&nth) {
            return Err(error);
        }

        let start = match cursor {
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| FetchError::Protocol(format!("bad cursor {c}")))?,
            None => 0,
        };
        let end = (start + limit).min(self.events.len());
        let has_next_page = end < self.events.len();

        Ok(EventPage {
            nodes: self.events[start.min(end)..end].to_vec(),
            page_info: PageInfo {
                end_cursor: has_next_page.then(|| end.to_string()),
                has_next_page,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// StaticTokenDirectory
// ---------------------------------------------------------------------------

/// Resolves phrases from a fixed table, case-insensitively.
#[derive(Default)]
pub struct StaticTokenDirectory {
    tokens: HashMap<String, TokenInfo>,
}

impl StaticTokenDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, phrase: &str, token: TokenInfo) -> Self {
        self.tokens.insert(phrase.to_lowercase(), token);
        self
    }
}

#[async_trait]
impl TokenDirectory for StaticTokenDirectory {
    async fn find_token(&self, phrase: &str, network_id: u64) -> Result<TokenInfo, FetchError> {
        self.tokens
            .get(&phrase.to_lowercase())
            .filter(|t| t.network_id == network_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("no token matches {phrase}")))
    }
}

// ---------------------------------------------------------------------------
// ScriptedCandidateSource
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Script {
    opens: VecDeque<Result<(), FetchError>>,
    snapshots: VecDeque<Result<Vec<CandidateItem>, FetchError>>,
    samples: Option<Result<Vec<SampleWallet>, FetchError>>,
    min_usd_seen: Vec<Decimal>,
}

/// Candidate source whose snapshots are scripted per tick.
///
/// Each opened session pops the next open result and, on `snapshot`, the
/// next snapshot (an empty snapshot once the script runs out). Snapshots
/// are filtered by the threshold passed in, like a real source would.
#[derive(Clone, Default)]
pub struct ScriptedCandidateSource {
    script: Arc<Mutex<Script>>,
    opened: Arc<AtomicU32>,
    released: Arc<AtomicU32>,
}

impl ScriptedCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(self, snapshots: Vec<Result<Vec<CandidateItem>, FetchError>>) -> Self {
        self.script.lock().snapshots = snapshots.into();
        self
    }

    pub fn with_open_results(self, results: Vec<Result<(), FetchError>>) -> Self {
        self.script.lock().opens = results.into();
        self
    }

    /// What every `sample_wallets` call returns.
    pub fn with_samples(self, samples: Result<Vec<SampleWallet>, FetchError>) -> Self {
        self.script.lock().samples = Some(samples);
        self
    }

    /// Queue one more snapshot.
    pub fn push_snapshot(&self, snapshot: Result<Vec<CandidateItem>, FetchError>) {
        self.script.lock().snapshots.push_back(snapshot);
    }

    pub fn opened(&self) -> u32 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u32 {
        self.released.load(Ordering::SeqCst)
    }

    /// Thresholds passed to `snapshot`, in call order.
    pub fn thresholds(&self) -> Vec<Decimal> {
        self.script.lock().min_usd_seen.clone()
    }
}

#[async_trait]
impl CandidateSource for ScriptedCandidateSource {
    async fn open_session(&self) -> Result<Box<dyn CandidateSession>, FetchError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let open = self.script.lock().opens.pop_front().unwrap_or(Ok(()));
        open?;
        Ok(Box::new(ScriptedSession {
            script: Arc::clone(&self.script),
            released: Arc::clone(&self.released),
        }))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    released: Arc<AtomicU32>,
}

#[async_trait]
impl CandidateSession for ScriptedSession {
    async fn snapshot(&mut self, min_usd: Decimal) -> Result<Vec<CandidateItem>, FetchError> {
        let mut script = self.script.lock();
        script.min_usd_seen.push(min_usd);
        let items = script.snapshots.pop_front().unwrap_or(Ok(Vec::new()))?;
        Ok(items.into_iter().filter(|i| i.amount_usd >= min_usd).collect())
    }

    async fn sample_wallets(
        &mut self,
        _item: &CandidateItem,
        limit: usize,
    ) -> Result<Vec<SampleWallet>, FetchError> {
        match self.script.lock().samples.clone() {
            Some(Ok(mut samples)) => {
                samples.truncate(limit);
                Ok(samples)
            }
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    async fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
