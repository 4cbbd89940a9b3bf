//! Device: the state shared by every appliance: identity, power and status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HomeError, ValidationError};
use crate::id::DeviceId;

/// The kind of appliance, used for report labels and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Kettle,
    Bath,
    Door,
}

impl DeviceKind {
    /// Label used in status report lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Kettle => "kettle",
            Self::Bath => "bath",
            Self::Door => "door",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status label of a device.
///
/// Each kind only ever reaches a subset: lights stay in `Off`/`On`, kettles
/// add `Heating`/`Ready`, baths add `Filling`/`Filled`/`Empty`, doors use
/// `Locked`/`Unlocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Off,
    On,
    Heating,
    Ready,
    Filling,
    Filled,
    Empty,
    Locked,
    Unlocked,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Heating => "heating",
            Self::Ready => "ready",
            Self::Filling => "filling",
            Self::Filled => "filled",
            Self::Empty => "empty",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        })
    }
}

/// Base state embedded in every appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    name: String,
    kind: DeviceKind,
    is_on: bool,
    status: Status,
}

impl Device {
    /// Create a switched-off device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty or blank.
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Result<Self, HomeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self {
            id: DeviceId::new(),
            name,
            kind,
            is_on: false,
            status: Status::Off,
        })
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Switch the device on. Always succeeds.
    pub fn turn_on(&mut self) -> String {
        self.is_on = true;
        self.status = Status::On;
        format!("{} turned on.", self.name)
    }

    /// Switch the device off. Always succeeds.
    pub fn turn_off(&mut self) -> String {
        self.is_on = false;
        self.status = Status::Off;
        format!("{} turned off.", self.name)
    }

    /// `"<name>: <kind> - <status>"`, the common prefix of every report line.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{}: {} - {}", self.name, self.kind, self.status)
    }

    /// Snapshot of the base fields; variants fill in their extras.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            is_on: self.is_on,
            status: self.status,
            temperature: None,
            water_temperature: None,
            is_filled: None,
        }
    }
}

/// Read-only, serialisable view of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub is_on: bool,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_temperature: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_filled: Option<bool>,
}
