//! Alert sink port.
//!
//! Sinks receive [`Alert`]s produced by monitors. Delivery is
//! fire-and-forget: the core never looks at a return value.

use tracing::info;

use crate::domain::Alert;

/// Trait for alert handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `deliver` method should not block or perform slow I/O synchronously
/// - Consider queueing onto a channel and doing slow work on a worker task
pub trait AlertSink: Send + Sync {
    /// Handle an alert.
    fn deliver(&self, alert: Alert);
}

/// Registry of sinks (composite pattern).
///
/// Broadcasts alerts to all registered sinks.
pub struct SinkRegistry {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl SinkRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: vec![] }
    }

    /// Register a sink.
    pub fn register(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for SinkRegistry {
    fn deliver(&self, alert: Alert) {
        for sink in &self.sinks {
            sink.deliver(alert.clone());
        }
    }
}

/// A no-op sink for testing or when alerting is disabled.
pub struct NullSink;

impl AlertSink for NullSink {
    fn deliver(&self, _alert: Alert) {}
}

/// A sink that logs alerts via tracing.
pub struct LogSink;

impl AlertSink for LogSink {
    fn deliver(&self, alert: Alert) {
        info!(
            subscriber = %alert.subscriber,
            key = %alert.key,
            subject = %alert.subject,
            amount_usd = %alert.amount_usd,
            address = %alert.address,
            sample_wallets = alert.sample_wallets.len(),
            "Large trade alert"
        );
    }
}
