//! Appliance handles: thread-safe wrappers around the domain state machines.
//!
//! Every handle keeps its state behind a mutex so the caller and the
//! background task of a timed process never write concurrently. Handles that
//! run timed processes also own a [`TimedProcessRunner`](crate::timed_process::TimedProcessRunner).

mod bath;
mod door;
mod kettle;
mod light;

pub use bath::Bath;
pub use door::Door;
pub use kettle::Kettle;
pub use light::Light;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use smarthome_domain::device::{DeviceKind, DeviceSnapshot, Status};

/// Durations of the fixed-length timed processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub boil: Duration,
    pub fill: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            boil: Duration::from_secs(10),
            fill: Duration::from_secs(10),
        }
    }
}

/// Any appliance the registry can hold.
pub enum Appliance<N> {
    Light(Light),
    Kettle(Kettle<N>),
    Bath(Bath<N>),
    Door(Door),
}

impl<N> Appliance<N> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Light(d) => d.name(),
            Self::Kettle(d) => d.name(),
            Self::Bath(d) => d.name(),
            Self::Door(d) => d.name(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::Kettle(_) => DeviceKind::Kettle,
            Self::Bath(_) => DeviceKind::Bath,
            Self::Door(_) => DeviceKind::Door,
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.snapshot().is_on
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.snapshot().status
    }

    pub fn turn_on(&self) -> String {
        match self {
            Self::Light(d) => d.turn_on(),
            Self::Kettle(d) => d.turn_on(),
            Self::Bath(d) => d.turn_on(),
            Self::Door(d) => d.turn_on(),
        }
    }

    pub fn turn_off(&self) -> String {
        match self {
            Self::Light(d) => d.turn_off(),
            Self::Kettle(d) => d.turn_off(),
            Self::Bath(d) => d.turn_off(),
            Self::Door(d) => d.turn_off(),
        }
    }

    /// One status report line for this device.
    #[must_use]
    pub fn describe_status(&self) -> String {
        match self {
            Self::Light(d) => d.describe_status(),
            Self::Kettle(d) => d.describe_status(),
            Self::Bath(d) => d.describe_status(),
            Self::Door(d) => d.describe_status(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        match self {
            Self::Light(d) => d.snapshot(),
            Self::Kettle(d) => d.snapshot(),
            Self::Bath(d) => d.snapshot(),
            Self::Door(d) => d.snapshot(),
        }
    }
}

impl<N> Appliance<N>
where
    N: crate::ports::NotificationPublisher + Send + Sync + 'static,
{
    /// Run the variant's main action.
    ///
    /// # Panics
    ///
    /// Kettles and baths start timed processes, which panics outside of a
    /// Tokio runtime.
    pub fn perform_action(&self) -> String {
        match self {
            Self::Light(d) => d.perform_action(),
            Self::Kettle(d) => d.perform_action(),
            Self::Bath(d) => d.perform_action(),
            Self::Door(d) => d.perform_action(),
        }
    }
}

impl<N> From<Light> for Appliance<N> {
    fn from(value: Light) -> Self {
        Self::Light(value)
    }
}

impl<N> From<Kettle<N>> for Appliance<N> {
    fn from(value: Kettle<N>) -> Self {
        Self::Kettle(value)
    }
}

impl<N> From<Bath<N>> for Appliance<N> {
    fn from(value: Bath<N>) -> Self {
        Self::Bath(value)
    }
}

impl<N> From<Door> for Appliance<N> {
    fn from(value: Door) -> Self {
        Self::Door(value)
    }
}

/// Lock `state`, recovering the data if a previous holder panicked.
fn lock_state<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
