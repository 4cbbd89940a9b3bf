//! Notification port: where completed timed processes report to.

use std::future::Future;

use smarthome_domain::error::HomeError;
use smarthome_domain::notification::Notification;

/// Delivers completion notifications to interested subscribers.
pub trait NotificationPublisher {
    /// Publish a notification to all current subscribers.
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send;
}

impl<T: NotificationPublisher + Send + Sync> NotificationPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send {
        (**self).publish(notification)
    }
}
