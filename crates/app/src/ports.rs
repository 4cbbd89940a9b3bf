//! Port definitions: traits that adapters implement.
//!
//! The presentation layer decides how a notification reaches the user; the
//! core only hands it to a [`NotificationPublisher`].

pub mod notification;

pub use notification::NotificationPublisher;
