//! Candidate snapshot port used by the monitor.
//!
//! A tick opens one session, asks it for a snapshot, optionally asks it for
//! per-candidate wallet samples, and releases it. Whatever a session holds
//! (an HTTP connection, a cached event window, a browser page) lives exactly
//! as long as the tick.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{CandidateItem, SampleWallet};
use crate::error::FetchError;

/// Factory for per-tick sessions.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Acquire a session for one tick.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the underlying resource cannot be acquired.
    async fn open_session(&self) -> Result<Box<dyn CandidateSession>, FetchError>;

    /// Name used in logs.
    fn source_name(&self) -> &'static str;
}

/// A tick-scoped view of the live source.
#[async_trait]
pub trait CandidateSession: Send {
    /// Current candidates with `amount_usd >= min_usd`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the snapshot cannot be taken.
    async fn snapshot(&mut self, min_usd: Decimal) -> Result<Vec<CandidateItem>, FetchError>;

    /// Up to `limit` wallets that give context to `item`, largest first.
    ///
    /// What counts as context is up to the source: the event-backed source
    /// ranks every wallet trading the item's pair in the snapshot window, not
    /// only the counterparties of the trade itself. Sources without detail
    /// data keep the default and return nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the detail lookup fails.
    async fn sample_wallets(
        &mut self,
        _item: &CandidateItem,
        _limit: usize,
    ) -> Result<Vec<SampleWallet>, FetchError> {
        Ok(Vec::new())
    }

    /// Release whatever the session holds. Called once per tick on every
    /// exit path; the session is dropped right after.
    async fn release(&mut self);
}
