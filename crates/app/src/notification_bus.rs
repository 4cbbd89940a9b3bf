//! In-process notification bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use smarthome_domain::error::HomeError;
use smarthome_domain::notification::Notification;

use crate::ports::NotificationPublisher;

/// In-process notification bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when nobody is listening (the notification is
/// simply dropped). A slow subscriber that falls more than `capacity`
/// notifications behind loses the oldest ones.
pub struct InProcessNotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl InProcessNotificationBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InProcessNotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl NotificationPublisher for InProcessNotificationBus {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send {
        match self.sender.send(notification) {
            Ok(receivers) => tracing::debug!(receivers, "notification delivered"),
            Err(_) => tracing::debug!("notification dropped, no subscribers"),
        }
        async { Ok(()) }
    }
}
