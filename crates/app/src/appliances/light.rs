//! Light handle: every operation is instantaneous.

use std::sync::Mutex;

use smarthome_domain::device::DeviceSnapshot;
use smarthome_domain::error::HomeError;
use smarthome_domain::light::LightState;

use super::lock_state;

pub struct Light {
    name: String,
    state: Mutex<LightState>,
}

impl Light {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        let state = LightState::new(name)?;
        Ok(Self {
            name: state.device().name().to_string(),
            state: Mutex::new(state),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn temperature(&self) -> i32 {
        lock_state(&self.state).temperature()
    }

    pub fn turn_on(&self) -> String {
        lock_state(&self.state).turn_on()
    }

    pub fn turn_off(&self) -> String {
        lock_state(&self.state).turn_off()
    }

    pub fn set_temperature(&self, temperature: i32) -> String {
        lock_state(&self.state).set_temperature(temperature)
    }

    pub fn perform_action(&self) -> String {
        lock_state(&self.state).perform_action()
    }

    #[must_use]
    pub fn describe_status(&self) -> String {
        lock_state(&self.state).describe_status()
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        lock_state(&self.state).snapshot()
    }
}
