//! Thermostat readings and the "any room heating" signal.
//!
//! Readings are fetched from the gateway once per cycle and discarded
//! afterwards. Only the HVAC action matters for the heating decision; the
//! temperatures are carried for logging.

use serde::{Deserialize, Serialize};

/// What a room thermostat reports it is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    /// Calling for heat.
    Heating,
    /// Powered but not calling for heat.
    Idle,
    /// Switched off.
    Off,
    /// Anything else the gateway reports (cooling, drying, …).
    #[serde(other)]
    Other,
}

/// A single room thermostat as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatReading {
    /// Gateway-assigned device identifier.
    pub device_id: String,
    /// Human-readable room or device name.
    pub name: String,
    /// Current activity.
    pub hvac_action: HvacAction,
    /// Measured room temperature in °C.
    pub current_temperature: f64,
    /// Configured room target in °C.
    pub target_temperature: f64,
}

impl ThermostatReading {
    /// Whether this thermostat is actively calling for heat.
    #[must_use]
    pub fn is_heating(&self) -> bool {
        self.hvac_action == HvacAction::Heating
    }
}

/// First reading that is actively heating, in input order.
pub fn first_heating<'a, I>(readings: I) -> Option<&'a ThermostatReading>
where
    I: IntoIterator<Item = &'a ThermostatReading>,
{
    readings.into_iter().find(|reading| reading.is_heating())
}

/// Whether any room is actively heating. Empty input yields `false`.
pub fn any_heating<'a, I>(readings: I) -> bool
where
    I: IntoIterator<Item = &'a ThermostatReading>,
{
    first_heating(readings).is_some()
}
