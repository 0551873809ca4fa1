//! Alert records handed to sinks.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::SubscriberId;
use super::summary::TraderSummary;
use super::watch::{CandidateItem, WatchKey};

/// A wallet shown alongside an alert to give it context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleWallet {
    pub wallet: String,
    pub total_usd: Decimal,
    pub orders: u64,
}

impl From<&TraderSummary> for SampleWallet {
    fn from(summary: &TraderSummary) -> Self {
        Self {
            wallet: summary.wallet.clone(),
            total_usd: summary.total_usd,
            orders: summary.order_count,
        }
    }
}

/// A newly observed high-value trade for one subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub subscriber: SubscriberId,
    pub key: WatchKey,
    pub subject: String,
    pub amount_usd: Decimal,
    pub amount_text: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    pub sample_wallets: Vec<SampleWallet>,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    #[must_use]
    pub fn from_candidate(
        subscriber: SubscriberId,
        item: CandidateItem,
        sample_wallets: Vec<SampleWallet>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            subscriber,
            key: item.key,
            subject: item.subject,
            amount_usd: item.amount_usd,
            amount_text: item.amount_text,
            address: item.address,
            detail_url: item.detail_url,
            sample_wallets,
            timestamp,
        }
    }
}
