//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory (or the path in
//! `SMARTHOME_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use smarthome_app::appliances::Timings;
use smarthome_domain::device::DeviceKind;

const DEFAULT_PATH: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Durations of timed processes.
    pub timing: TimingConfig,
    /// Household, in display order.
    pub devices: Vec<DeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Timed process durations, in seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub boil_secs: u64,
    pub fill_secs: u64,
    /// Length of one unit of a `schedule` delay (60 means minutes).
    pub schedule_unit_secs: u64,
}

/// One appliance of the household.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    pub kind: DeviceKind,
    pub name: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SMARTHOME_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SMARTHOME_BOIL_SECS") {
            if let Ok(secs) = val.parse() {
                self.timing.boil_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("SMARTHOME_FILL_SECS") {
            if let Ok(secs) = val.parse() {
                self.timing.fill_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("boil_secs", self.timing.boil_secs),
            ("fill_secs", self.timing.fill_secs),
            ("schedule_unit_secs", self.timing.schedule_unit_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{field} must be non-zero")));
            }
        }
        let mut seen = HashSet::new();
        for device in &self.devices {
            if device.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} without a name",
                    device.kind
                )));
            }
            if !seen.insert(device.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate device name {:?}",
                    device.name
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        Timings {
            boil: Duration::from_secs(self.timing.boil_secs),
            fill: Duration::from_secs(self.timing.fill_secs),
        }
    }

    #[must_use]
    pub fn schedule_unit(&self) -> Duration {
        Duration::from_secs(self.timing.schedule_unit_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let device = |kind, name: &str| DeviceConfig {
            kind,
            name: name.to_string(),
        };
        Self {
            logging: LoggingConfig::default(),
            timing: TimingConfig::default(),
            devices: vec![
                device(DeviceKind::Light, "Bedroom"),
                device(DeviceKind::Light, "Kitchen"),
                device(DeviceKind::Light, "Living room"),
                device(DeviceKind::Bath, "Bath"),
                device(DeviceKind::Kettle, "Kettle"),
                device(DeviceKind::Door, "Front door"),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome_app=info".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            boil_secs: 10,
            fill_secs: 10,
            schedule_unit_secs: 60,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
