//! # smarthome-domain
//!
//! Pure domain model for the smarthome appliance simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define the **Device** base state (name, power, status label)
//! - Define the appliance **state machines** (light, kettle, bath, door) and
//!   every reply string their transitions produce
//! - Define **Notifications** emitted when a timed process completes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and knows nothing about time
//! passing. Timed transitions are split into a `begin_*` and a `finish_*`
//! step; the `app` crate decides when the second one runs.

pub mod error;
pub mod id;

pub mod bath;
pub mod device;
pub mod door;
pub mod kettle;
pub mod light;
pub mod notification;
