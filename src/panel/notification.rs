//! Panel change notifications.
//!
//! Fan-out over a `tokio` broadcast channel. Sending never fails: with no
//! subscribers the notification is simply dropped.

use tokio::sync::broadcast;

use super::DocumentId;

/// Notification buffer per subscriber
const CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNotification {
    /// Readiness was set (fires on every `onReady`, even if already ready)
    ReadyChanged { document: DocumentId, ready: bool },
    /// A different panel (or none) became active
    ActiveChanged { document: Option<DocumentId> },
}

pub struct Notifier {
    tx: broadcast::Sender<PanelNotification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelNotification> {
        self.tx.subscribe()
    }

    pub fn send(&self, notification: PanelNotification) {
        let _ = self.tx.send(notification);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
