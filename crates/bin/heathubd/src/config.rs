//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `heathub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use chrono::NaiveTime;
use serde::Deserialize;

use heathub_domain::boiler::ProgramMode;
use heathub_domain::button::{ButtonEvaluator, QuietHours};
use heathub_domain::decision::{DEFAULT_ESCALATION_DELTA, DEFAULT_SETBACK_TEMPERATURE, HeatingPolicy};
use heathub_domain::thermostat::HvacAction;

const QUIET_TIME_FORMAT: &str = "%H:%M";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Cycle scheduling.
    pub scheduler: SchedulerConfig,
    /// Button monitor settings.
    pub button: ButtonConfig,
    /// Heating decision tunables.
    pub policy: PolicyConfig,
    /// Journal retention.
    pub journal: JournalConfig,
    /// Initial state of the simulated collaborators.
    #[serde(rename = "virtual")]
    pub simulation: VirtualConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Serve the dashboard at all.
    pub enabled: bool,
    /// Dashboard auto-reload interval in seconds.
    pub refresh_seconds: u32,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// When cycles run.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between cycles; `0` runs a single cycle and exits.
    pub interval_secs: u64,
}

/// Button monitor configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Include the button in the decision.
    pub enabled: bool,
    /// How long an "up" press keeps asking for heat.
    pub working_duration_minutes: f64,
}

/// Decision tunables.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Degrees added to the boiler reading when escalating.
    pub escalation_delta: f64,
    /// Target written when nothing asks for heat.
    pub setback_temperature: f64,
    /// Start of the nightly quiet window, `HH:MM`.
    pub quiet_start: String,
    /// End of the nightly quiet window, `HH:MM`.
    pub quiet_end: String,
}

/// Journal retention.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Log entries kept after each cycle. Must be at least 1.
    pub max_log_entries: usize,
}

/// Simulated collaborators used in place of real hardware.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Room thermostats reported by the gateway.
    pub rooms: Vec<RoomConfig>,
    /// Boiler temperature reading.
    pub boiler_current_temp: f64,
    /// Boiler set point.
    pub boiler_set_point: f64,
    /// Boiler program mode.
    pub program_mode: ProgramMode,
    /// Last "up" press, in minutes before start-up.
    pub button_up_minutes_ago: Option<i64>,
    /// Last "down" press, in minutes before start-up.
    pub button_down_minutes_ago: Option<i64>,
}

/// One simulated room thermostat.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    /// Display name.
    pub name: String,
    /// Reported HVAC action.
    pub hvac_action: HvacAction,
    /// Room temperature.
    #[serde(default = "default_room_temperature")]
    pub current_temperature: f64,
    /// Thermostat target.
    #[serde(default = "default_room_target")]
    pub target_temperature: f64,
}

fn default_room_temperature() -> f64 {
    19.0
}

fn default_room_target() -> f64 {
    20.0
}

impl Config {
    /// Load configuration from `heathub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("heathub.toml")?;
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
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HEATHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("HEATHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("HEATHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("HEATHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("HEATHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(secs) = var("HEATHUB_INTERVAL_SECS").and_then(|val| val.parse().ok()) {
            self.scheduler.interval_secs = secs;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.enabled && self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.button.enabled {
            self.button_evaluator()?;
        } else {
            self.quiet_hours()?;
        }
        self.policy()?;
        if self.journal.max_log_entries == 0 {
            return Err(ConfigError::Validation(
                "journal.max_log_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Build the heating policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for non-finite values.
    pub fn policy(&self) -> Result<HeatingPolicy, ConfigError> {
        HeatingPolicy::new(self.policy.escalation_delta, self.policy.setback_temperature)
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// Parse the quiet-hours window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for unparsable or equal bounds.
    pub fn quiet_hours(&self) -> Result<QuietHours, ConfigError> {
        let start = parse_quiet_time("quiet_start", &self.policy.quiet_start)?;
        let end = parse_quiet_time("quiet_end", &self.policy.quiet_end)?;
        QuietHours::new(start, end).map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// Build the button evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a non-positive working
    /// duration or an invalid quiet-hours window.
    pub fn button_evaluator(&self) -> Result<ButtonEvaluator, ConfigError> {
        ButtonEvaluator::new(self.button.working_duration_minutes, self.quiet_hours()?)
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }
}

fn parse_quiet_time(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, QUIET_TIME_FORMAT).map_err(|_| {
        ConfigError::Validation(format!("{field} must be an HH:MM time, got `{value}`"))
    })
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enabled: true,
            refresh_seconds: 30,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:heathub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "heathub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            working_duration_minutes: 30.0,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            escalation_delta: DEFAULT_ESCALATION_DELTA,
            setback_temperature: DEFAULT_SETBACK_TEMPERATURE,
            quiet_start: "23:00".to_string(),
            quiet_end: "05:30".to_string(),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            max_log_entries: 5000,
        }
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            rooms: vec![
                RoomConfig {
                    name: "Living room".to_string(),
                    hvac_action: HvacAction::Idle,
                    current_temperature: default_room_temperature(),
                    target_temperature: default_room_target(),
                },
                RoomConfig {
                    name: "Bathroom".to_string(),
                    hvac_action: HvacAction::Heating,
                    current_temperature: 18.5,
                    target_temperature: 21.0,
                },
            ],
            boiler_current_temp: 20.0,
            boiler_set_point: 20.0,
            program_mode: ProgramMode::Clock,
            button_up_minutes_ago: None,
            button_down_minutes_ago: None,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.enabled);
        assert_eq!(config.database.url, "sqlite:heathub.db?mode=rwc");
        assert_eq!(config.scheduler.interval_secs, 300);
        assert!(config.button.enabled);
        assert_eq!(config.journal.max_log_entries, 5000);
        assert_eq!(config.simulation.program_mode, ProgramMode::Clock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.policy.quiet_start, "23:00");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            enabled = false
            refresh_seconds = 10

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [scheduler]
            interval_secs = 0

            [button]
            enabled = false
            working_duration_minutes = 45.0

            [policy]
            escalation_delta = 1.5
            setback_temperature = 16.0
            quiet_start = '22:30'
            quiet_end = '06:00'

            [journal]
            max_log_entries = 200

            [virtual]
            boiler_current_temp = 18.0
            boiler_set_point = 19.0
            program_mode = 'manual'
            button_up_minutes_ago = 5

            [[virtual.rooms]]
            name = 'Office'
            hvac_action = 'heating'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert!(!config.server.enabled);
        assert_eq!(config.server.refresh_seconds, 10);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.scheduler.interval_secs, 0);
        assert!(!config.button.enabled);
        assert!((config.button.working_duration_minutes - 45.0).abs() < f64::EPSILON);
        assert_eq!(config.journal.max_log_entries, 200);
        assert_eq!(config.simulation.program_mode, ProgramMode::Manual);
        assert_eq!(config.simulation.button_up_minutes_ago, Some(5));
        assert_eq!(config.simulation.rooms.len(), 1);
        assert_eq!(config.simulation.rooms[0].hvac_action, HvacAction::Heating);
        assert!((config.simulation.rooms[0].target_temperature - 20.0).abs() < f64::EPSILON);

        let policy = config.policy().unwrap();
        assert!((policy.escalation_delta() - 1.5).abs() < f64::EPSILON);
        let quiet = config.quiet_hours().unwrap();
        assert_eq!(quiet.start(), NaiveTime::from_hms_opt(22, 30, 0).unwrap());
        assert_eq!(quiet.end(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_zero_port_when_server_disabled() {
        let mut config = Config::default();
        config.server.port = 0;
        config.server.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_non_positive_working_duration() {
        let mut config = Config::default();
        config.button.working_duration_minutes = 0.0;
        assert!(config.validate().is_err());

        config.button.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_unparsable_quiet_hours() {
        let mut config = Config::default();
        config.policy.quiet_start = "11pm".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: quiet_start must be an HH:MM time, got `11pm`"
        );
    }

    #[test]
    fn should_reject_empty_quiet_window() {
        let mut config = Config::default();
        config.policy.quiet_end = "23:00".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_non_finite_policy_values() {
        let mut config = Config::default();
        config.policy.setback_temperature = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_log_retention() {
        let mut config = Config::default();
        config.journal.max_log_entries = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: journal.max_log_entries must be at least 1"
        );
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[
            ("HEATHUB_PORT", "8080"),
            ("HEATHUB_DATABASE_URL", "sqlite::memory:"),
            ("HEATHUB_LOG", "heathub=debug"),
            ("HEATHUB_INTERVAL_SECS", "0"),
        ]));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "heathub=debug");
        assert_eq!(config.scheduler.interval_secs, 0);
    }

    #[test]
    fn should_prefer_rust_log_and_bind_overrides() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[
            ("HEATHUB_HOST", "10.0.0.1"),
            ("HEATHUB_BIND", "127.0.0.1:9191"),
            ("HEATHUB_LOG", "heathub=debug"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:9191");
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_numeric_overrides() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[
            ("HEATHUB_PORT", "eighty"),
            ("HEATHUB_INTERVAL_SECS", "-1"),
        ]));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scheduler.interval_secs, 300);
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
