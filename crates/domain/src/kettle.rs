//! Kettle: `off → on → heating → ready`.
//!
//! Boiling is a timed transition: [`KettleState::begin_boil`] moves to
//! `heating` and [`KettleState::finish_boil`] moves to `ready` once the
//! boil time has elapsed.

use std::time::Duration;

use crate::device::{Device, DeviceKind, DeviceSnapshot, Status};
use crate::error::HomeError;
use crate::notification::Notification;

/// Body of the notification emitted when the water has boiled.
pub const BOILED_MESSAGE: &str = "The kettle has boiled. Enjoy your tea!";

/// Why a boil request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilRefusal {
    /// The kettle must be switched on first.
    SwitchedOff,
    /// A boil is already running.
    AlreadyHeating,
}

impl BoilRefusal {
    /// Advisory reply for the caller.
    #[must_use]
    pub fn message(self, name: &str) -> String {
        match self {
            Self::SwitchedOff => format!("{name}: switched off."),
            Self::AlreadyHeating => format!("{name}: already heating."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KettleState {
    device: Device,
}

impl KettleState {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        Ok(Self {
            device: Device::new(name, DeviceKind::Kettle)?,
        })
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[must_use]
    pub fn is_heating(&self) -> bool {
        self.device.status() == Status::Heating
    }

    pub fn turn_on(&mut self) -> String {
        self.device.turn_on()
    }

    pub fn turn_off(&mut self) -> String {
        self.device.turn_off()
    }

    /// Start heating if the kettle is on and idle.
    ///
    /// # Errors
    ///
    /// Returns the [`BoilRefusal`] explaining why nothing changed.
    pub fn begin_boil(&mut self) -> Result<String, BoilRefusal> {
        if !self.device.is_on() {
            return Err(BoilRefusal::SwitchedOff);
        }
        if self.is_heating() {
            return Err(BoilRefusal::AlreadyHeating);
        }
        self.device.set_status(Status::Heating);
        Ok(format!("{}: switched on for boiling.", self.device.name()))
    }

    /// First half of a scheduled boil: power up and start heating.
    pub fn switch_on_and_boil(&mut self) {
        self.device.turn_on();
        self.device.set_status(Status::Heating);
    }

    /// The water has boiled.
    pub fn finish_boil(&mut self) -> Notification {
        self.device.set_status(Status::Ready);
        Notification::new(&self.device, BOILED_MESSAGE)
    }

    #[must_use]
    pub fn scheduled_message(&self, delay: Duration) -> String {
        format!(
            "{}: boil scheduled in {}.",
            self.device.name(),
            format_delay(delay)
        )
    }

    #[must_use]
    pub fn busy_message(&self) -> String {
        format!(
            "{}: a boil is already scheduled or in progress.",
            self.device.name()
        )
    }

    #[must_use]
    pub fn describe_status(&self) -> String {
        self.device.status_line()
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.device.snapshot()
    }
}

fn format_delay(delay: Duration) -> String {
    if delay.subsec_millis() == 0 {
        format!("{}s", delay.as_secs())
    } else {
        format!("{:.1}s", delay.as_secs_f64())
    }
}
