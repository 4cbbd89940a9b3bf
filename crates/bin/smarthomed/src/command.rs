//! Line-oriented shell commands.
//!
//! Device names may contain spaces, so commands taking a value read it from
//! the last token and treat everything in between as the name.

use std::time::Duration;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Status,
    StatusJson,
    On(String),
    Off(String),
    Action(String),
    Temperature { name: String, celsius: i32 },
    Schedule { name: String, delay: Duration },
    Lock(String),
    Unlock(String),
    Quit,
}

/// Errors produced while parsing a shell line.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` expects a device name")]
    MissingName(&'static str),
    #[error("`{0}` expects a value after the device name")]
    MissingValue(&'static str),
    #[error("invalid temperature {0:?}, expected whole degrees")]
    InvalidTemperature(String),
    #[error("invalid delay {0:?}, expected a non-negative number of minutes")]
    InvalidDelay(String),
}

pub const HELP: &str = "\
commands:
  help                        show this message
  list                        list devices
  status [json]               status report
  on <name>                   switch a device on
  off <name>                  switch a device off
  action <name>               run the device's main action
  temp <name> <celsius>       set a light or bath temperature
  schedule <name> <minutes>   boil the kettle after a delay
  lock <name>                 lock a door
  unlock <name>               unlock a door
  quit                        exit";

impl Command {
    /// Parse one non-blank line. `schedule_unit` is the length of one unit of
    /// a `schedule` delay.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing why the line is not a command.
    pub fn parse(line: &str, schedule_unit: Duration) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "list" | "ls" => Ok(Self::List),
            "status" if rest.eq_ignore_ascii_case("json") => Ok(Self::StatusJson),
            "status" if rest.is_empty() => Ok(Self::Status),
            "on" => name("on", rest).map(Self::On),
            "off" => name("off", rest).map(Self::Off),
            "action" => name("action", rest).map(Self::Action),
            "lock" => name("lock", rest).map(Self::Lock),
            "unlock" => name("unlock", rest).map(Self::Unlock),
            "temp" => {
                let (name, value) = name_and_value("temp", rest)?;
                let celsius = value
                    .parse()
                    .map_err(|_| CommandError::InvalidTemperature(value.to_string()))?;
                Ok(Self::Temperature { name, celsius })
            }
            "schedule" => {
                let (name, value) = name_and_value("schedule", rest)?;
                let delay = parse_delay(value, schedule_unit)?;
                Ok(Self::Schedule { name, delay })
            }
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}

fn name(verb: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingName(verb))
    } else {
        Ok(rest.to_string())
    }
}

fn name_and_value<'a>(verb: &'static str, rest: &'a str) -> Result<(String, &'a str), CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingName(verb));
    }
    let (name, value) = rest
        .rsplit_once(char::is_whitespace)
        .ok_or(CommandError::MissingValue(verb))?;
    Ok((name.trim_end().to_string(), value))
}

fn parse_delay(value: &str, unit: Duration) -> Result<Duration, CommandError> {
    let invalid = || CommandError::InvalidDelay(value.to_string());
    let units: f64 = value.parse().map_err(|_| invalid())?;
    if !units.is_finite() || units < 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(units * unit.as_secs_f64()).map_err(|_| invalid())
}
