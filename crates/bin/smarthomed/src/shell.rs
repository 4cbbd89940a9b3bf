//! Executes shell commands against a [`SmartHome`].

use std::time::Duration;

use smarthome_app::appliances::Appliance;
use smarthome_app::home::{SmartHome, unsupported};
use smarthome_app::ports::NotificationPublisher;
use smarthome_domain::error::HomeError;

use crate::command::{Command, CommandError, HELP};

/// What the read loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Home(#[from] HomeError),
    #[error("failed to encode snapshot")]
    Json(#[from] serde_json::Error),
}

pub struct Shell<N> {
    home: SmartHome<N>,
    schedule_unit: Duration,
}

impl<N> Shell<N>
where
    N: NotificationPublisher + Send + Sync + 'static,
{
    pub fn new(home: SmartHome<N>, schedule_unit: Duration) -> Self {
        Self {
            home,
            schedule_unit,
        }
    }

    #[cfg(test)]
    fn home(&self) -> &SmartHome<N> {
        &self.home
    }

    /// Parse and run one line. Blank lines produce an empty reply.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] when the line does not parse or the device
    /// rejects the operation.
    pub fn handle_line(&self, line: &str) -> Result<Outcome, ShellError> {
        if line.trim().is_empty() {
            return Ok(Outcome::Reply(String::new()));
        }
        let command = Command::parse(line, self.schedule_unit)?;
        tracing::debug!(?command, "executing");
        if command == Command::Quit {
            return Ok(Outcome::Quit);
        }
        self.execute(command).map(Outcome::Reply)
    }

    fn execute(&self, command: Command) -> Result<String, ShellError> {
        let home = &self.home;
        let reply = match command {
            Command::Help => HELP.to_string(),
            Command::List => home
                .devices()
                .iter()
                .map(|device| format!("{} ({})", device.name(), device.kind()))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Status => home.status_report(),
            Command::StatusJson => serde_json::to_string_pretty(&home.snapshot())?,
            Command::On(name) => home.device(&name)?.turn_on(),
            Command::Off(name) => home.device(&name)?.turn_off(),
            Command::Action(name) => home.device(&name)?.perform_action(),
            Command::Temperature { name, celsius } => match home.device(&name)? {
                Appliance::Light(light) => light.set_temperature(celsius),
                Appliance::Bath(bath) => bath.set_temperature(celsius),
                other => return Err(unsupported(other, "temperature settings").into()),
            },
            Command::Schedule { name, delay } => home.kettle(&name)?.schedule_boil(delay),
            Command::Lock(name) => home.door(&name)?.lock(),
            Command::Unlock(name) => home.door(&name)?.unlock(),
            Command::Quit => String::new(),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use smarthome_app::appliances::Timings;
    use smarthome_app::notification_bus::InProcessNotificationBus;
    use smarthome_domain::device::DeviceKind;

    fn shell() -> Shell<InProcessNotificationBus> {
        let mut home = SmartHome::new(
            Arc::new(InProcessNotificationBus::default()),
            Timings::default(),
        );
        home.add(DeviceKind::Light, "Living room").unwrap();
        home.add(DeviceKind::Bath, "Bath").unwrap();
        home.add(DeviceKind::Kettle, "Kettle").unwrap();
        home.add(DeviceKind::Door, "Front door").unwrap();
        Shell::new(home, Duration::from_secs(60))
    }

    fn reply(shell: &Shell<InProcessNotificationBus>, line: &str) -> String {
        match shell.handle_line(line).unwrap() {
            Outcome::Reply(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn should_list_devices_with_kinds() {
        let shell = shell();
        assert_eq!(
            reply(&shell, "list"),
            "Living room (light)\nBath (bath)\nKettle (kettle)\nFront door (door)"
        );
    }

    #[test]
    fn should_route_temperature_to_light_and_bath() {
        let shell = shell();
        assert_eq!(
            reply(&shell, "temp Living room 19"),
            "Living room: temperature set to 19°C."
        );
        assert_eq!(
            reply(&shell, "temp Bath 37"),
            "Bath: water temperature set to 37°C."
        );
    }

    #[test]
    fn should_reject_temperature_on_a_door() {
        let shell = shell();
        let err = shell.handle_line("temp Front door 20").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Front door is a door and does not support temperature settings"
        );
    }

    #[test]
    fn should_report_unknown_device() {
        let shell = shell();
        let err = shell.handle_line("on Garage").unwrap_err();
        assert!(matches!(err, ShellError::Home(HomeError::NotFound(_))));
        assert_eq!(err.to_string(), "Device 'Garage' not found");
    }

    #[test]
    fn should_lock_and_unlock_door() {
        let shell = shell();
        assert_eq!(reply(&shell, "lock Front door"), "Front door locked.");
        assert_eq!(reply(&shell, "unlock Front door"), "Front door unlocked.");
    }

    #[test]
    fn should_quit_and_ignore_blank_lines() {
        let shell = shell();
        assert_eq!(shell.handle_line("quit").unwrap(), Outcome::Quit);
        assert_eq!(
            shell.handle_line("   ").unwrap(),
            Outcome::Reply(String::new())
        );
    }

    #[test]
    fn should_encode_snapshot_as_json() {
        let shell = shell();
        let json = reply(&shell, "status json");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let devices = value.as_array().unwrap();
        assert_eq!(devices.len(), 4);
        assert_eq!(devices[0]["name"], "Living room");
        assert_eq!(devices[0]["temperature"], 22);
    }

    #[tokio::test(start_paused = true)]
    async fn should_schedule_boil_in_minutes() {
        let shell = shell();
        assert_eq!(
            reply(&shell, "schedule Kettle 5"),
            "Kettle: boil scheduled in 300s."
        );
        assert!(shell.home().kettle("Kettle").unwrap().is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn should_start_filling_bath_through_action() {
        let shell = shell();
        reply(&shell, "temp Bath 36");
        assert_eq!(reply(&shell, "action Bath"), "Bath: filling with water.");
        assert_eq!(
            reply(&shell, "status").lines().nth(1),
            Some("Bath: bath - filling, water temperature 36°C")
        );
    }
}
