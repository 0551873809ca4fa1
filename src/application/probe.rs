//! Data-source health probe.
//!
//! Read-only and never on the alerting path: a failing probe is reported in
//! the [`ProbeReport`], not raised.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::CandidateItem;
use crate::error::FetchError;
use crate::port::outbound::candidate::CandidateSource;
use crate::port::outbound::clock::Clock;

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// Items in an unfiltered snapshot.
    pub candidate_count: usize,
    /// Items carrying a positive USD amount.
    pub currency_reference_count: usize,
    pub plausible: bool,
    pub checked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks that the live source currently exposes token and price content.
pub struct VerificationProbe {
    source: Arc<dyn CandidateSource>,
    clock: Arc<dyn Clock>,
}

impl VerificationProbe {
    #[must_use]
    pub fn new(source: Arc<dyn CandidateSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub async fn verify(&self) -> ProbeReport {
        let result = self.snapshot().await;
        let checked_at = self.clock.now();

        let report = match result {
            Ok(items) => {
                let candidate_count = items.len();
                let currency_reference_count = items
                    .iter()
                    .filter(|i| i.amount_usd > Decimal::ZERO)
                    .count();
                ProbeReport {
                    candidate_count,
                    currency_reference_count,
                    plausible: candidate_count > 0 && currency_reference_count > 0,
                    checked_at,
                    error: None,
                }
            }
            Err(e) => ProbeReport {
                candidate_count: 0,
                currency_reference_count: 0,
                plausible: false,
                checked_at,
                error: Some(e.to_string()),
            },
        };

        if report.plausible {
            info!(
                source = self.source.source_name(),
                candidates = report.candidate_count,
                priced = report.currency_reference_count,
                "Data source looks healthy"
            );
        } else {
            warn!(
                source = self.source.source_name(),
                candidates = report.candidate_count,
                priced = report.currency_reference_count,
                error = report.error.as_deref().unwrap_or(""),
                "Data source looks implausible"
            );
        }
        report
    }

    async fn snapshot(&self) -> Result<Vec<CandidateItem>, FetchError> {
        let mut session = self.source.open_session().await?;
        let result = session.snapshot(Decimal::ZERO).await;
        session.release().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::domain::candidate;
    use crate::testkit::source::ScriptedCandidateSource;
    use rust_decimal_macros::dec;

    fn probe(source: &ScriptedCandidateSource) -> VerificationProbe {
        VerificationProbe::new(Arc::new(source.clone()), Arc::new(ManualClock::default()))
    }

    #[tokio::test]
    async fn plausible_when_priced_candidates_exist() {
        let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![
            candidate("0xaaa", dec!(0)),
            candidate("0xbbb", dec!(12.5)),
        ])]);

        let report = probe(&source).verify().await;

        assert_eq!(report.candidate_count, 2);
        assert_eq!(report.currency_reference_count, 1);
        assert!(report.plausible);
        assert_eq!(source.thresholds(), vec![Decimal::ZERO]);
        assert_eq!(source.released(), 1);
    }

    #[tokio::test]
    async fn empty_snapshot_is_implausible() {
        let source = ScriptedCandidateSource::new().with_snapshots(vec![Ok(vec![])]);
        let report = probe(&source).verify().await;
        assert!(!report.plausible);
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn unpriced_candidates_are_implausible() {
        let source = ScriptedCandidateSource::new()
            .with_snapshots(vec![Ok(vec![candidate("0xaaa", dec!(0))])]);
        let report = probe(&source).verify().await;
        assert_eq!(report.candidate_count, 1);
        assert!(!report.plausible);
    }

    #[tokio::test]
    async fn failure_is_reported_not_raised() {
        let source = ScriptedCandidateSource::new()
            .with_open_results(vec![Err(FetchError::Auth("invalid API key".into()))]);
        let report = probe(&source).verify().await;
        assert!(!report.plausible);
        assert!(report.error.unwrap().contains("invalid API key"));
    }
}
