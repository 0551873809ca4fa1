//! Persisted subscriber shape.
//!
//! The core only produces and consumes this shape; reading and writing it
//! is the job of a [`SubscriberStore`](crate::port::outbound::store::SubscriberStore)
//! adapter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::SubscriberId;

/// Current subscriber book format version.
pub const SUBSCRIBER_BOOK_VERSION: &str = "1";

/// What is needed to resume one subscriber's monitor after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    pub min_usd: Decimal,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default)]
    pub alert_count: u64,
}

/// All active subscribers keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberBook {
    pub version: String,
    pub subscribers: BTreeMap<SubscriberId, SubscriberRecord>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SubscriberBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: SUBSCRIBER_BOOK_VERSION.to_string(),
            subscribers: BTreeMap::new(),
            updated_at: None,
        }
    }

    pub fn insert(&mut self, id: SubscriberId, record: SubscriberRecord) {
        self.subscribers.insert(id, record);
    }

    #[must_use]
    pub fn get(&self, id: &SubscriberId) -> Option<&SubscriberRecord> {
        self.subscribers.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl Default for SubscriberBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn book_round_trips_through_json() {
        let mut book = SubscriberBook::new();
        book.insert(
            SubscriberId::new("777"),
            SubscriberRecord {
                min_usd: dec!(1000),
                started_at: Utc::now(),
                last_check: None,
                alert_count: 4,
            },
        );

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"777\""));
        let parsed: SubscriberBook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let json = r#"{
            "version": "1",
            "subscribers": {
                "chat-1": { "minUsd": "500", "startedAt": "2026-01-01T00:00:00Z" }
            }
        }"#;
        let book: SubscriberBook = serde_json::from_str(json).unwrap();
        let record = book.get(&SubscriberId::new("chat-1")).unwrap();
        assert_eq!(record.alert_count, 0);
        assert_eq!(record.last_check, None);
        assert_eq!(record.min_usd, dec!(500));
    }
}
