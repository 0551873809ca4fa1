//! Snapshot candidates and their dedup identity.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Identity of an observation for idempotent alerting.
///
/// Not a domain entity: two observations with the same key are treated as
/// the same trade, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchKey {
    pub subject_address: String,
    /// Amount in whole cents.
    pub amount_bucket: i64,
    /// Observation time divided by the bucket width, 0 when untimed.
    pub time_bucket: i64,
}

impl WatchKey {
    #[must_use]
    pub fn new(subject_address: impl Into<String>, amount_bucket: i64, time_bucket: i64) -> Self {
        Self {
            subject_address: subject_address.into(),
            amount_bucket,
            time_bucket,
        }
    }

    /// Build a key from a raw observation.
    ///
    /// Addresses are lowercased so checksum casing never splits a key.
    /// Amounts beyond the `i64` cent range saturate.
    /// A `bucket_secs` of zero yields an untimed key.
    #[must_use]
    pub fn from_observation(
        subject_address: &str,
        amount_usd: Decimal,
        observed_at: i64,
        bucket_secs: u64,
    ) -> Self {
        let cents = amount_usd
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| {
                c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .unwrap_or(if amount_usd.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            });
        let time_bucket = match i64::try_from(bucket_secs) {
            Ok(width) if width > 0 => observed_at.div_euclid(width),
            _ => 0,
        };
        Self::new(subject_address.to_ascii_lowercase(), cents, time_bucket)
    }
}

impl fmt::Display for WatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.subject_address, self.amount_bucket, self.time_bucket
        )
    }
}

/// A snapshot-time observation at or above the alert threshold, not yet
/// checked against dedup state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    pub key: WatchKey,
    /// Human label of what was traded (token symbol or pair label).
    pub subject: String,
    pub amount_usd: Decimal,
    /// Amount as the source displayed it.
    pub amount_text: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
}
