//! Recording [`AlertSink`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{Alert, WatchKey};
use crate::port::outbound::sink::AlertSink;

/// Thread-safe alert collector for delivery assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingSink {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.lock().is_empty()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    /// Keys of every delivered alert, in delivery order.
    pub fn keys(&self) -> Vec<WatchKey> {
        self.alerts.lock().iter().map(|a| a.key.clone()).collect()
    }
}

impl AlertSink for RecordingSink {
    fn deliver(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }
}
