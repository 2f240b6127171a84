//! Virtual thermostat gateway — a fixed set of room readings.

use std::sync::Mutex;

use heathub_app::ports::ThermostatGateway;
use heathub_domain::error::{Collaborator, HeatHubError};
use heathub_domain::thermostat::ThermostatReading;

use super::{InjectedFailure, lock};

/// A simulated gateway that reports whatever rooms it was given.
#[derive(Default)]
pub struct VirtualGateway {
    readings: Mutex<Vec<ThermostatReading>>,
    failure: Mutex<Option<InjectedFailure>>,
}

impl VirtualGateway {
    /// Create a gateway reporting `readings`.
    #[must_use]
    pub fn new(readings: Vec<ThermostatReading>) -> Self {
        Self {
            readings: Mutex::new(readings),
            failure: Mutex::new(None),
        }
    }

    /// Replace the reported rooms.
    pub fn set_readings(&self, readings: Vec<ThermostatReading>) {
        *lock(&self.readings) = readings;
    }

    /// Make subsequent polls fail, or succeed again with `None`.
    pub fn fail_with(&self, failure: Option<InjectedFailure>) {
        *lock(&self.failure) = failure;
    }
}

impl ThermostatGateway for VirtualGateway {
    async fn poll(&self) -> Result<Vec<ThermostatReading>, HeatHubError> {
        if let Some(failure) = *lock(&self.failure) {
            return Err(failure.into_error(Collaborator::Gateway));
        }
        Ok(lock(&self.readings).clone())
    }
}
