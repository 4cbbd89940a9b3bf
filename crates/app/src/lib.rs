//! # smarthome-app
//!
//! Application layer: concurrent appliance handles, the timed process
//! runner and the [`SmartHome`](home::SmartHome) registry.
//!
//! ## Responsibilities
//! - Define the **port** the core talks to the outside world through:
//!   - `NotificationPublisher`: delivers completion notifications
//! - Provide **in-process infrastructure** (notification bus) that doesn't need IO
//! - Run timed transitions in the background, at most one per device
//! - Keep the registry of devices and aggregate their status
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tokio` for tasks, timers and
//! channels). Timed operations spawn onto the ambient Tokio runtime, so
//! they must be called from inside one.

pub mod appliances;
pub mod home;
pub mod notification_bus;
pub mod ports;
pub mod timed_process;
