//! Thermostat gateway port.

use std::future::Future;

use heathub_domain::error::HeatHubError;
use heathub_domain::thermostat::ThermostatReading;

/// Polls the room-thermostat gateway.
pub trait ThermostatGateway {
    /// Fetch a fresh reading for every climate device behind the gateway.
    ///
    /// Fails with [`HeatHubError::Connectivity`] when the gateway cannot be
    /// reached and [`HeatHubError::Authentication`] when it rejects us.
    fn poll(&self) -> impl Future<Output = Result<Vec<ThermostatReading>, HeatHubError>> + Send;
}

impl<T: ThermostatGateway + Send + Sync> ThermostatGateway for std::sync::Arc<T> {
    fn poll(&self) -> impl Future<Output = Result<Vec<ThermostatReading>, HeatHubError>> + Send {
        (**self).poll()
    }
}
