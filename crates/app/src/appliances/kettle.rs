//! Kettle handle: boils in the background, optionally on a schedule.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use smarthome_domain::device::DeviceSnapshot;
use smarthome_domain::error::HomeError;
use smarthome_domain::kettle::KettleState;

use super::{Timings, lock_state};
use crate::ports::NotificationPublisher;
use crate::timed_process::{ProcessSlot, TimedProcessRunner};

/// A kettle whose boil runs as a timed process.
///
/// Only one boil, scheduled or running, can be in flight at a time; further
/// requests are answered with an advisory reply and change nothing.
pub struct Kettle<N> {
    name: String,
    state: Arc<Mutex<KettleState>>,
    runner: TimedProcessRunner<N>,
    boil_time: Duration,
}

impl<N> Kettle<N> {
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        publisher: Arc<N>,
        timings: Timings,
    ) -> Result<Self, HomeError> {
        let state = KettleState::new(name)?;
        let name = state.device().name().to_string();
        Ok(Self {
            runner: TimedProcessRunner::new(name.clone(), publisher),
            name,
            state: Arc::new(Mutex::new(state)),
            boil_time: timings.boil,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a boil is scheduled or running.
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

    #[must_use]
    pub fn describe_status(&self) -> String {
        lock_state(&self.state).describe_status()
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        lock_state(&self.state).snapshot()
    }
}

impl<N> Kettle<N>
where
    N: NotificationPublisher + Send + Sync + 'static,
{
    /// Start boiling if the kettle is on and idle. Returns immediately.
    ///
    /// # Panics
    ///
    /// Panics when a boil starts outside of a Tokio runtime.
    pub fn perform_action(&self) -> String {
        let mut state = lock_state(&self.state);
        let Some(slot) = self.runner.reserve("boil") else {
            return state.busy_message();
        };
        self.start_boil(&mut state, slot)
    }

    /// Switch on and boil once `delay` has elapsed.
    ///
    /// A zero delay is [`turn_on`](Self::turn_on) followed by
    /// [`perform_action`](Self::perform_action), applied under one lock so
    /// a busy kettle is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn schedule_boil(&self, delay: Duration) -> String {
        if delay.is_zero() {
            let mut state = lock_state(&self.state);
            let Some(slot) = self.runner.reserve("boil") else {
                return state.busy_message();
            };
            state.turn_on();
            return self.start_boil(&mut state, slot);
        }

        let Some(slot) = self.runner.reserve("scheduled boil") else {
            return lock_state(&self.state).busy_message();
        };
        let shared = Arc::clone(&self.state);
        let boil_time = self.boil_time;
        slot.spawn(async move {
            tokio::time::sleep(delay).await;
            lock_state(&shared).switch_on_and_boil();
            tokio::time::sleep(boil_time).await;
            lock_state(&shared).finish_boil()
        });
        lock_state(&self.state).scheduled_message(delay)
    }

    fn start_boil(&self, state: &mut KettleState, slot: ProcessSlot<N>) -> String {
        match state.begin_boil() {
            Ok(reply) => {
                let shared = Arc::clone(&self.state);
                slot.spawn_after(self.boil_time, move || lock_state(&shared).finish_boil());
                reply
            }
            Err(refusal) => refusal.message(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification_bus::InProcessNotificationBus;
    use smarthome_domain::device::Status;
    use smarthome_domain::kettle::BOILED_MESSAGE;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::{Instant, sleep};

    fn kettle() -> (
        Kettle<InProcessNotificationBus>,
        tokio::sync::broadcast::Receiver<smarthome_domain::notification::Notification>,
    ) {
        let bus = Arc::new(InProcessNotificationBus::new(8));
        let rx = bus.subscribe();
        let kettle = Kettle::new("Kettle", bus, Timings::default()).unwrap();
        (kettle, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn should_heat_then_become_ready_with_one_notification() {
        let (kettle, mut rx) = kettle();
        let start = Instant::now();

        kettle.turn_on();
        assert_eq!(kettle.perform_action(), "Kettle: switched on for boiling.");
        assert_eq!(kettle.snapshot().status, Status::Heating);

        sleep(Duration::from_secs(9)).await;
        assert_eq!(kettle.snapshot().status, Status::Heating);

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.body, BOILED_MESSAGE);
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert_eq!(kettle.snapshot().status, Status::Ready);

        sleep(Duration::from_secs(60)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert!(!kettle.is_busy());
    }

    #[tokio::test]
    async fn should_not_boil_when_switched_off() {
        let (kettle, _rx) = kettle();
        let before = kettle.snapshot();

        assert_eq!(kettle.perform_action(), "Kettle: switched off.");
        assert_eq!(kettle.snapshot(), before);
        assert!(!kettle.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn should_reject_boil_while_heating() {
        let (kettle, mut rx) = kettle();
        kettle.turn_on();
        kettle.perform_action();

        assert_eq!(
            kettle.perform_action(),
            "Kettle: a boil is already scheduled or in progress."
        );

        rx.recv().await.unwrap();
        sleep(Duration::from_secs(30)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_treat_zero_delay_schedule_as_immediate_boil() {
        let (scheduled, _rx1) = kettle();
        let (manual, _rx2) = kettle();

        let scheduled_reply = scheduled.schedule_boil(Duration::ZERO);
        manual.turn_on();
        let manual_reply = manual.perform_action();

        assert_eq!(scheduled_reply, manual_reply);
        let (a, b) = (scheduled.snapshot(), manual.snapshot());
        assert_eq!((a.is_on, a.status), (b.is_on, b.status));
        assert_eq!(a.status, Status::Heating);
    }

    #[tokio::test(start_paused = true)]
    async fn should_switch_on_and_boil_after_scheduled_delay() {
        let (kettle, mut rx) = kettle();
        let delay = Duration::from_secs(300);

        assert_eq!(
            kettle.schedule_boil(delay),
            "Kettle: boil scheduled in 300s."
        );
        assert!(kettle.is_busy());
        assert_eq!(kettle.snapshot().status, Status::Off);

        sleep(delay + Duration::from_secs(1)).await;
        let snapshot = kettle.snapshot();
        assert!(snapshot.is_on);
        assert_eq!(snapshot.status, Status::Heating);

        rx.recv().await.unwrap();
        assert_eq!(kettle.snapshot().status, Status::Ready);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_reject_overlapping_schedules() {
        let (kettle, mut rx) = kettle();
        kettle.schedule_boil(Duration::from_secs(60));

        assert_eq!(
            kettle.schedule_boil(Duration::from_secs(30)),
            "Kettle: a boil is already scheduled or in progress."
        );

        rx.recv().await.unwrap();
        sleep(Duration::from_secs(120)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert!(!kettle.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn should_leave_heating_kettle_untouched_when_zero_delay_schedule_is_rejected() {
        let (kettle, mut rx) = kettle();
        kettle.turn_on();
        kettle.perform_action();
        let before = kettle.snapshot();

        assert_eq!(
            kettle.schedule_boil(Duration::ZERO),
            "Kettle: a boil is already scheduled or in progress."
        );
        assert_eq!(kettle.snapshot(), before);
        assert_eq!(kettle.snapshot().status, Status::Heating);

        rx.recv().await.unwrap();
        sleep(Duration::from_secs(30)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_kettle_off_when_zero_delay_schedule_hits_pending_one() {
        let (kettle, _rx) = kettle();
        kettle.schedule_boil(Duration::from_secs(600));

        assert_eq!(
            kettle.schedule_boil(Duration::ZERO),
            "Kettle: a boil is already scheduled or in progress."
        );
        let snapshot = kettle.snapshot();
        assert!(!snapshot.is_on);
        assert_eq!(snapshot.status, Status::Off);
        assert!(kettle.is_busy());
    }
}
