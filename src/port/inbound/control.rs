//! Monitor control port for operator-facing adapters.
//!
//! Keeps control surfaces (CLI, a chat bot, an HTTP route) decoupled from
//! the registry that actually owns the monitor loops.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{MonitorStatus, SubscriberId};
use crate::error::ControlError;

/// Start/stop/status for per-subscriber monitors.
#[async_trait]
pub trait MonitorControl: Send + Sync {
    /// Start monitoring for `subscriber` with the given USD threshold.
    ///
    /// # Errors
    ///
    /// [`ControlError::AlreadyRunning`] if a monitor for this subscriber is
    /// running; nothing is changed in that case.
    async fn start(&self, subscriber: &SubscriberId, min_usd: Decimal) -> Result<(), ControlError>;

    /// Stop the subscriber's monitor. An in-flight tick is allowed to finish.
    ///
    /// # Errors
    ///
    /// [`ControlError::NotRunning`] if there is nothing to stop.
    fn stop(&self, subscriber: &SubscriberId) -> Result<(), ControlError>;

    /// Current status, `None` for an unknown subscriber.
    fn status(&self, subscriber: &SubscriberId) -> Option<MonitorStatus>;
}
