//! Door handle.

use std::sync::Mutex;

use smarthome_domain::device::DeviceSnapshot;
use smarthome_domain::door::DoorState;
use smarthome_domain::error::HomeError;

use super::lock_state;

pub struct Door {
    name: String,
    state: Mutex<DoorState>,
}

impl Door {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        let state = DoorState::new(name)?;
        Ok(Self {
            name: state.device().name().to_string(),
            state: Mutex::new(state),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn turn_on(&self) -> String {
        lock_state(&self.state).turn_on()
    }

    pub fn turn_off(&self) -> String {
        lock_state(&self.state).turn_off()
    }

    pub fn lock(&self) -> String {
        tracing::info!(device = %self.name, "door locked");
        lock_state(&self.state).lock()
    }

    pub fn unlock(&self) -> String {
        tracing::info!(device = %self.name, "door unlocked");
        lock_state(&self.state).unlock()
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

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::device::Status;

    #[test]
    fn should_report_unlocked_after_lock_then_unlock() {
        let door = Door::new("Front door").unwrap();
        door.lock();
        door.unlock();
        assert_eq!(door.perform_action(), "Front door: door unlocked.");
        assert_eq!(door.snapshot().status, Status::Unlocked);
    }

    #[test]
    fn should_restore_off_after_round_trip() {
        let door = Door::new("Front door").unwrap();
        door.turn_on();
        door.turn_off();
        assert_eq!(door.describe_status(), "Front door: door - off");
    }
}
