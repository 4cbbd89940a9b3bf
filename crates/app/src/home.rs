//! `SmartHome`: the ordered registry of every appliance in one household.
//!
//! The registry only reads device state (lookups, status report,
//! snapshots); every mutation goes through the appliance handles it returns.

use std::sync::Arc;

use smarthome_domain::device::{DeviceKind, DeviceSnapshot};
use smarthome_domain::error::{HomeError, NotFoundError, UnsupportedError};

use crate::appliances::{Appliance, Bath, Door, Kettle, Light, Timings};

/// Ordered collection of appliances; insertion order is display order.
pub struct SmartHome<N> {
    devices: Vec<Appliance<N>>,
    publisher: Arc<N>,
    timings: Timings,
}

impl<N> SmartHome<N> {
    /// Create an empty household whose timed processes report to `publisher`.
    pub fn new(publisher: Arc<N>, timings: Timings) -> Self {
        Self {
            devices: Vec::new(),
            publisher,
            timings,
        }
    }

    /// Append an already-built appliance. Names are not checked for uniqueness.
    #[tracing::instrument(skip_all, fields(device = device.name(), kind = %device.kind()))]
    pub fn add_device(&mut self, device: Appliance<N>) {
        tracing::info!("device added");
        self.devices.push(device);
    }

    /// Build an appliance of `kind` wired to this household's publisher and
    /// timings, then append it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty; the registry
    /// is left untouched.
    pub fn add(&mut self, kind: DeviceKind, name: impl Into<String>) -> Result<(), HomeError> {
        let device: Appliance<N> = match kind {
            DeviceKind::Light => Light::new(name)?.into(),
            DeviceKind::Kettle => {
                Kettle::new(name, Arc::clone(&self.publisher), self.timings)?.into()
            }
            DeviceKind::Bath => Bath::new(name, Arc::clone(&self.publisher), self.timings)?.into(),
            DeviceKind::Door => Door::new(name)?.into(),
        };
        self.add_device(device);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    #[must_use]
    pub fn devices(&self) -> &[Appliance<N>] {
        &self.devices
    }

    /// Device names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(Appliance::name)
    }

    /// Find the first device called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] when no device has that name.
    pub fn device(&self, name: &str) -> Result<&Appliance<N>, HomeError> {
        self.devices
            .iter()
            .find(|device| device.name() == name)
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Device",
                    id: name.to_string(),
                }
                .into()
            })
    }

    /// # Errors
    ///
    /// [`HomeError::NotFound`] for an unknown name, [`HomeError::Unsupported`]
    /// when the device is not a light.
    pub fn light(&self, name: &str) -> Result<&Light, HomeError> {
        match self.device(name)? {
            Appliance::Light(light) => Ok(light),
            other => Err(unsupported(other, "light operations")),
        }
    }

    /// # Errors
    ///
    /// [`HomeError::NotFound`] for an unknown name, [`HomeError::Unsupported`]
    /// when the device is not a kettle.
    pub fn kettle(&self, name: &str) -> Result<&Kettle<N>, HomeError> {
        match self.device(name)? {
            Appliance::Kettle(kettle) => Ok(kettle),
            other => Err(unsupported(other, "kettle operations")),
        }
    }

    /// # Errors
    ///
    /// [`HomeError::NotFound`] for an unknown name, [`HomeError::Unsupported`]
    /// when the device is not a bath.
    pub fn bath(&self, name: &str) -> Result<&Bath<N>, HomeError> {
        match self.device(name)? {
            Appliance::Bath(bath) => Ok(bath),
            other => Err(unsupported(other, "bath operations")),
        }
    }

    /// # Errors
    ///
    /// [`HomeError::NotFound`] for an unknown name, [`HomeError::Unsupported`]
    /// when the device is not a door.
    pub fn door(&self, name: &str) -> Result<&Door, HomeError> {
        match self.device(name)? {
            Appliance::Door(door) => Ok(door),
            other => Err(unsupported(other, "door operations")),
        }
    }

    /// One line per device, in insertion order, each formatted by the
    /// device itself.
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self), fields(devices = self.devices.len()))]
    pub fn status_report(&self) -> String {
        self.devices
            .iter()
            .map(Appliance::describe_status)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<DeviceSnapshot> {
        self.devices.iter().map(Appliance::snapshot).collect()
    }
}

/// Error for an operation `device`'s kind does not offer.
pub fn unsupported<N>(device: &Appliance<N>, operation: &'static str) -> HomeError {
    UnsupportedError {
        device: device.name().to_string(),
        kind: device.kind(),
        operation,
    }
    .into()
}
