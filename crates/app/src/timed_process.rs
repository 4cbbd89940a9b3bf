//! Timed process runner: applies a transition in the background after a
//! delay and publishes its completion notification.
//!
//! A device owns one [`TimedProcessRunner`]. Starting a process first
//! [`reserve`](TimedProcessRunner::reserve)s the device's in-flight slot; a
//! second reservation fails until the first process has applied its
//! transition, so two timed processes never interleave writes on one device.
//! Processes cannot be cancelled once spawned.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use smarthome_domain::notification::Notification;

use crate::ports::NotificationPublisher;

/// Per-device gate and launcher for timed processes.
pub struct TimedProcessRunner<N> {
    device: String,
    in_flight: Arc<AtomicBool>,
    publisher: Arc<N>,
}

impl<N> TimedProcessRunner<N> {
    /// Create a runner for the device called `device`.
    pub fn new(device: impl Into<String>, publisher: Arc<N>) -> Self {
        Self {
            device: device.into(),
            in_flight: Arc::new(AtomicBool::new(false)),
            publisher,
        }
    }

    /// Whether a timed process is currently reserved or running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the device's in-flight slot for `process`.
    ///
    /// Returns `None` when another process holds it. Dropping the returned
    /// slot without spawning gives it back.
    #[must_use]
    pub fn reserve(&self, process: &'static str) -> Option<ProcessSlot<N>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(
                device = %self.device,
                process,
                "timed process rejected, another one is in flight"
            );
            return None;
        }
        Some(ProcessSlot {
            device: self.device.clone(),
            process,
            in_flight: Arc::clone(&self.in_flight),
            publisher: Arc::clone(&self.publisher),
        })
    }
}

/// Exclusive right to run one timed process on a device.
pub struct ProcessSlot<N> {
    device: String,
    process: &'static str,
    in_flight: Arc<AtomicBool>,
    publisher: Arc<N>,
}

impl<N> ProcessSlot<N>
where
    N: NotificationPublisher + Send + Sync + 'static,
{
    /// Run `transition` once `delay` has elapsed.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn spawn_after<F>(self, delay: Duration, transition: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Notification + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            transition()
        })
    }

    /// Drive `work` to completion in a background task.
    ///
    /// The slot is released as soon as `work` resolves, before the
    /// notification it produced is published.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn spawn<F>(self, work: F) -> JoinHandle<()>
    where
        F: Future<Output = Notification> + Send + 'static,
    {
        tracing::info!(device = %self.device, process = self.process, "timed process started");
        tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let notification = work.await;

            let publisher = Arc::clone(&self.publisher);
            let device = self.device.clone();
            let process = self.process;
            drop(self);

            tracing::info!(
                %device,
                process,
                elapsed = ?started.elapsed(),
                "timed process completed"
            );
            if let Err(err) = publisher.publish(notification).await {
                tracing::warn!(%err, %device, "failed to publish completion notification");
            }
        })
    }
}

impl<N> Drop for ProcessSlot<N> {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::device::{Device, DeviceKind};
    use smarthome_domain::error::HomeError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SpyPublisher {
        notifications: Mutex<Vec<Notification>>,
    }

    impl NotificationPublisher for SpyPublisher {
        fn publish(
            &self,
            notification: Notification,
        ) -> impl Future<Output = Result<(), HomeError>> + Send {
            self.notifications.lock().unwrap().push(notification);
            async { Ok(()) }
        }
    }

    fn runner() -> (TimedProcessRunner<SpyPublisher>, Arc<SpyPublisher>) {
        let spy = Arc::new(SpyPublisher::default());
        (TimedProcessRunner::new("Kettle", Arc::clone(&spy)), spy)
    }

    fn notification() -> Notification {
        let device = Device::new("Kettle", DeviceKind::Kettle).unwrap();
        Notification::new(&device, "done")
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_transition_once_delay_has_elapsed() {
        let (runner, spy) = runner();
        let applied = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&applied);

        let start = tokio::time::Instant::now();
        let handle = runner
            .reserve("boil")
            .unwrap()
            .spawn_after(Duration::from_secs(10), move || {
                flag.store(true, Ordering::SeqCst);
                notification()
            });

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(!applied.load(Ordering::SeqCst));
        assert!(spy.notifications.lock().unwrap().is_empty());

        handle.await.unwrap();
        assert!(applied.load(Ordering::SeqCst));
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert_eq!(spy.notifications.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_reject_second_reservation_while_in_flight() {
        let (runner, _spy) = runner();
        let handle = runner
            .reserve("boil")
            .unwrap()
            .spawn_after(Duration::from_secs(10), notification);

        assert!(runner.is_running());
        assert!(runner.reserve("boil").is_none());

        handle.await.unwrap();
        assert!(!runner.is_running());
        assert!(runner.reserve("boil").is_some());
    }

    #[tokio::test]
    async fn should_release_slot_when_dropped_without_spawning() {
        let (runner, spy) = runner();
        let slot = runner.reserve("fill").unwrap();
        assert!(runner.is_running());

        drop(slot);
        assert!(!runner.is_running());
        assert!(spy.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_publish_exactly_once_per_process() {
        let (runner, spy) = runner();
        for _ in 0..3 {
            runner
                .reserve("boil")
                .unwrap()
                .spawn_after(Duration::from_secs(1), notification)
                .await
                .unwrap();
        }
        assert_eq!(spy.notifications.lock().unwrap().len(), 3);
    }
}
