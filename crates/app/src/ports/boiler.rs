//! Boiler control port.
//!
//! Each write is an independent network call; the device offers no atomic
//! multi-write.

use std::future::Future;

use heathub_domain::boiler::BoilerStatus;
use heathub_domain::error::HeatHubError;

/// Reads and commands the cloud-controlled boiler.
pub trait BoilerControl {
    /// Fetch the live status.
    fn get_status(&self) -> impl Future<Output = Result<BoilerStatus, HeatHubError>> + Send;

    /// Write the manual room-temperature target.
    fn set_room_temperature(
        &self,
        value: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Switch the manual-temperature override on or off.
    fn set_override(&self, enabled: bool) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Write the override temperature.
    fn set_override_temperature(
        &self,
        value: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;
}

impl<T: BoilerControl + Send + Sync> BoilerControl for std::sync::Arc<T> {
    fn get_status(&self) -> impl Future<Output = Result<BoilerStatus, HeatHubError>> + Send {
        (**self).get_status()
    }

    fn set_room_temperature(
        &self,
        value: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        (**self).set_room_temperature(value)
    }

    fn set_override(&self, enabled: bool) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        (**self).set_override(enabled)
    }

    fn set_override_temperature(
        &self,
        value: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        (**self).set_override_temperature(value)
    }
}
