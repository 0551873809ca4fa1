//! Channel-backed alert sink.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::Alert;
use crate::port::outbound::sink::AlertSink;

/// Forwards alerts to an unbounded channel so slow consumers (stdout,
/// a chat bot) never block a monitor tick.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Alert>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelSink {
    fn deliver(&self, alert: Alert) {
        if self.tx.send(alert).is_err() {
            debug!("Alert receiver dropped, discarding alert");
        }
    }
}
