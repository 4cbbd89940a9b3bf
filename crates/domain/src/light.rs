//! Light: on/off plus a colour temperature that can be set at any time.

use crate::device::{Device, DeviceKind, DeviceSnapshot};
use crate::error::HomeError;

/// Temperature a new light starts with, in °C.
pub const DEFAULT_TEMPERATURE: i32 = 22;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightState {
    device: Device,
    temperature: i32,
}

impl LightState {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        Ok(Self {
            device: Device::new(name, DeviceKind::Light)?,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[must_use]
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn turn_on(&mut self) -> String {
        self.device.turn_on()
    }

    pub fn turn_off(&mut self) -> String {
        self.device.turn_off()
    }

    /// Store `temperature` as is; range checks are the caller's business.
    pub fn set_temperature(&mut self, temperature: i32) -> String {
        self.temperature = temperature;
        format!(
            "{}: temperature set to {temperature}°C.",
            self.device.name()
        )
    }

    /// Read-only report of power and temperature.
    #[must_use]
    pub fn perform_action(&self) -> String {
        let power = if self.device.is_on() { "on" } else { "off" };
        format!(
            "{}: light {power}, temperature {}°C.",
            self.device.name(),
            self.temperature
        )
    }

    #[must_use]
    pub fn describe_status(&self) -> String {
        format!(
            "{}, temperature {}°C",
            self.device.status_line(),
            self.temperature
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            temperature: Some(self.temperature),
            ..self.device.snapshot()
        }
    }
}
