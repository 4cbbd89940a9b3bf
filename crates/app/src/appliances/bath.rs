//! Bath handle: fills in the background, drains instantly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use smarthome_domain::bath::BathState;
use smarthome_domain::device::DeviceSnapshot;
use smarthome_domain::error::HomeError;

use super::{Timings, lock_state};
use crate::ports::NotificationPublisher;
use crate::timed_process::TimedProcessRunner;

pub struct Bath<N> {
    name: String,
    state: Arc<Mutex<BathState>>,
    runner: TimedProcessRunner<N>,
    fill_time: Duration,
}

impl<N> Bath<N> {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        publisher: Arc<N>,
        timings: Timings,
    ) -> Result<Self, HomeError> {
        let state = BathState::new(name)?;
        let name = state.device().name().to_string();
        Ok(Self {
            runner: TimedProcessRunner::new(name.clone(), publisher),
            name,
            state: Arc::new(Mutex::new(state)),
            fill_time: timings.fill,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        lock_state(&self.state).is_filled()
    }

    #[must_use]
    pub fn water_temperature(&self) -> Option<i32> {
        lock_state(&self.state).water_temperature()
    }

    /// Whether a fill is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.runner.is_running()
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

    #[must_use]
    pub fn describe_status(&self) -> String {
        lock_state(&self.state).describe_status()
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        lock_state(&self.state).snapshot()
    }
}

impl<N> Bath<N>
where
    N: NotificationPublisher + Send + Sync + 'static,
{
    /// Drain a full bath, otherwise start filling it.
    ///
    /// # Panics
    ///
    /// Panics when a fill starts outside of a Tokio runtime.
    pub fn perform_action(&self) -> String {
        let mut state = lock_state(&self.state);
        if state.is_filled() {
            tracing::info!(device = %self.name, "bath drained");
            return state.drain();
        }

        let Some(slot) = self.runner.reserve("fill") else {
            return state.busy_message();
        };
        match state.begin_fill() {
            Ok(reply) => {
                let shared = Arc::clone(&self.state);
                slot.spawn_after(self.fill_time, move || lock_state(&shared).finish_fill());
                reply
            }
            Err(refusal) => refusal.message(&self.name),
        }
    }
}
