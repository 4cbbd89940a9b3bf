//! Bath: `empty → filling → filled`, drained on demand.
//!
//! Filling needs a water temperature and takes time: [`BathState::begin_fill`]
//! moves to `filling`, [`BathState::finish_fill`] to `filled`. Draining is
//! instantaneous.

use crate::device::{Device, DeviceKind, DeviceSnapshot, Status};
use crate::error::HomeError;
use crate::notification::Notification;

/// Body of the notification emitted when the bath is full.
pub const FILLED_MESSAGE: &str = "The bath is full. Enjoy your soak!";

/// Why a fill request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRefusal {
    TemperatureUnset,
    AlreadyFilled,
    AlreadyFilling,
}

impl FillRefusal {
    #[must_use]
    pub fn message(self, name: &str) -> String {
        match self {
            Self::TemperatureUnset => {
                format!("{name}: please set the water temperature before filling.")
            }
            Self::AlreadyFilled => format!("{name}: already filled."),
            Self::AlreadyFilling => format!("{name}: already filling."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BathState {
    device: Device,
    water_temperature: Option<i32>,
    is_filled: bool,
}

impl BathState {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        Ok(Self {
            device: Device::new(name, DeviceKind::Bath)?,
            water_temperature: None,
            is_filled: false,
        })
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[must_use]
    pub fn water_temperature(&self) -> Option<i32> {
        self.water_temperature
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.is_filled
    }

    pub fn turn_on(&mut self) -> String {
        self.device.turn_on()
    }

    pub fn turn_off(&mut self) -> String {
        self.device.turn_off()
    }

    /// Legal in any state, including mid-fill.
    pub fn set_temperature(&mut self, temperature: i32) -> String {
        self.water_temperature = Some(temperature);
        format!(
            "{}: water temperature set to {temperature}°C.",
            self.device.name()
        )
    }

    /// Start filling.
    ///
    /// # Errors
    ///
    /// Returns the [`FillRefusal`] explaining why nothing changed.
    pub fn begin_fill(&mut self) -> Result<String, FillRefusal> {
        if self.is_filled {
            return Err(FillRefusal::AlreadyFilled);
        }
        if self.device.status() == Status::Filling {
            return Err(FillRefusal::AlreadyFilling);
        }
        if self.water_temperature.is_none() {
            return Err(FillRefusal::TemperatureUnset);
        }
        self.device.set_status(Status::Filling);
        Ok(format!("{}: filling with water.", self.device.name()))
    }

    pub fn finish_fill(&mut self) -> Notification {
        self.is_filled = true;
        self.device.set_status(Status::Filled);
        Notification::new(&self.device, FILLED_MESSAGE)
    }

    pub fn drain(&mut self) -> String {
        self.is_filled = false;
        self.device.set_status(Status::Empty);
        format!("{}: water drained.", self.device.name())
    }

    #[must_use]
    pub fn busy_message(&self) -> String {
        FillRefusal::AlreadyFilling.message(self.device.name())
    }

    #[must_use]
    pub fn describe_status(&self) -> String {
        match self.water_temperature {
            Some(t) => format!("{}, water temperature {t}°C", self.device.status_line()),
            None => format!("{}, water temperature unset", self.device.status_line()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            water_temperature: self.water_temperature,
            is_filled: Some(self.is_filled),
            ..self.device.snapshot()
        }
    }
}
