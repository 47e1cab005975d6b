//! # Notifications
//!
//! Where cart operations report what the shopper needs to know.
//!
//! ```text
//! CartStore ──notify(&Notice)──► LogNotifier       tracing::warn!
//!                              └► ChannelNotifier   mpsc ──► UI toast loop
//! ```

use rocketshoes_core::{Notice, Notification};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the log only. Useful headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        warn!(product_id = notice.product_id(), "{}", notice);
    }
}

/// Forwards notices to a UI layer over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiver the UI drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: &Notice) {
        if self.tx.send(Notification::new(*notice)).is_err() {
            debug!(%notice, "Notification receiver dropped");
        }
    }
}
