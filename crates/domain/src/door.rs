//! Door: lock and unlock regardless of power.

use crate::device::{Device, DeviceKind, DeviceSnapshot, Status};
use crate::error::HomeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorState {
    device: Device,
}

impl DoorState {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        Ok(Self {
            device: Device::new(name, DeviceKind::Door)?,
        })
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn turn_on(&mut self) -> String {
        self.device.turn_on()
    }

    pub fn turn_off(&mut self) -> String {
        self.device.turn_off()
    }

    pub fn lock(&mut self) -> String {
        self.device.set_status(Status::Locked);
        format!("{} locked.", self.device.name())
    }

    pub fn unlock(&mut self) -> String {
        self.device.set_status(Status::Unlocked);
        format!("{} unlocked.", self.device.name())
    }

    #[must_use]
    pub fn perform_action(&self) -> String {
        format!("{}: door {}.", self.device.name(), self.device.status())
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
