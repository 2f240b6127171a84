//! Boiler status as read from the cloud-controlled water heater.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the boiler picks its room-temperature target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramMode {
    /// The manual target is authoritative.
    Manual,
    /// A weekly schedule drives the target; manual targets need an override.
    Clock,
}

impl ProgramMode {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Clock => "clock",
        }
    }
}

impl fmt::Display for ProgramMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live boiler reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoilerStatus {
    /// Measured temperature at the boiler's room sensor in °C.
    pub current_temp: f64,
    /// Active set point in °C.
    pub set_point: f64,
    /// Active program mode.
    pub program_mode: ProgramMode,
}

impl BoilerStatus {
    /// Whether the measured temperature already reached the set point.
    #[must_use]
    pub fn is_at_or_above_set_point(&self) -> bool {
        self.current_temp >= self.set_point
    }
}
