//! Notification: the one-time message emitted when a timed process completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind};
use crate::id::{DeviceId, NotificationId};

/// Title carried by every completion notification.
pub const NOTIFICATION_TITLE: &str = "Notification";

/// A completion notice for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub device_id: DeviceId,
    pub device_name: String,
    pub kind: DeviceKind,
    pub title: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Build a notification about `device`, stamped with the current time.
    #[must_use]
    pub fn new(device: &Device, body: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            device_id: device.id(),
            device_name: device.name().to_string(),
            kind: device.kind(),
            title: NOTIFICATION_TITLE.to_string(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.title, self.body)
    }
}
