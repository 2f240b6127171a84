//! Journal records: "last time X happened" flags and the product log.
//!
//! The journal is what the dashboard shows. It is distinct from `tracing`
//! output, which is for operators.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Collaborator, ValidationError};
use crate::id::LogEntryId;
use crate::time::{Timestamp, now};

/// Flag written at the start of every cycle.
pub const FLAG_LAST_APP_RUN: &str = "last_date_app_run";
/// Flag written when the button asked for heat.
pub const FLAG_LAST_BUTTON_ON: &str = "last_date_button_on";
/// Flag written when the boiler target was escalated.
pub const FLAG_LAST_HEAT_ON: &str = "last_date_heat_on";

/// Key-value record, overwritten on each write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Unique key.
    pub key: String,
    /// Arbitrary JSON value.
    pub value: serde_json::Value,
    /// When the value was last written.
    pub last_write: Timestamp,
}

impl Flag {
    /// Build a flag, checking the key is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFlagKey`] for an empty or blank key.
    pub fn new(
        key: impl Into<String>,
        value: serde_json::Value,
        last_write: Timestamp,
    ) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::EmptyFlagKey);
        }
        Ok(Self {
            key,
            value,
            last_write,
        })
    }

    /// A flag whose value is its own write time as local wall-clock text
    /// (`%Y-%m-%d %H:%M:%S`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFlagKey`] for an empty or blank key.
    pub fn timestamped(
        key: impl Into<String>,
        at: &DateTime<FixedOffset>,
    ) -> Result<Self, ValidationError> {
        let value = serde_json::Value::String(at.format("%Y-%m-%d %H:%M:%S").to_string());
        Self::new(key, value, at.with_timezone(&Utc))
    }
}

/// Severity of a journal log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Normal operation.
    Info,
    /// Something went wrong.
    Error,
}

impl Severity {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "error" => Ok(Self::Error),
            other => Err(ValidationError::UnknownSeverity(other.to_string())),
        }
    }
}

/// One line of the product log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier.
    pub id: LogEntryId,
    /// When the line was written.
    pub timestamp: Timestamp,
    /// Which collaborator the line is about.
    pub device: Collaborator,
    /// Severity.
    pub severity: Severity,
    /// Free-form message.
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(device: Collaborator, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: now(),
            device,
            severity,
            message: message.into(),
        }
    }

    /// Informational entry.
    pub fn info(device: Collaborator, message: impl Into<String>) -> Self {
        Self::new(device, Severity::Info, message)
    }

    /// Error entry.
    pub fn error(device: Collaborator, message: impl Into<String>) -> Self {
        Self::new(device, Severity::Error, message)
    }
}
