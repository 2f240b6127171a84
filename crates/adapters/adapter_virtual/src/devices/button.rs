//! Virtual button cloud — serves a device-shadow document.

use std::sync::Mutex;

use heathub_app::ports::ButtonCloud;
use heathub_domain::button::ButtonEdgePair;
use heathub_domain::error::{Collaborator, HeatHubError};
use serde_json::Value;

use super::{InjectedFailure, lock};
use crate::shadow;

/// A simulated button whose state lives in a cloud-shadow JSON document.
pub struct VirtualButton {
    shadow: Mutex<Value>,
    failure: Mutex<Option<InjectedFailure>>,
}

impl Default for VirtualButton {
    fn default() -> Self {
        Self::from_presses(None, None)
    }
}

impl VirtualButton {
    /// Create a button serving `shadow` as-is.
    #[must_use]
    pub fn new(shadow: Value) -> Self {
        Self {
            shadow: Mutex::new(shadow),
            failure: Mutex::new(None),
        }
    }

    /// Create a button whose last presses happened at the given Unix seconds.
    #[must_use]
    pub fn from_presses(up: Option<i64>, down: Option<i64>) -> Self {
        Self::new(shadow::document(up, down))
    }

    /// Replace the shadow document.
    pub fn set_shadow(&self, shadow: Value) {
        *lock(&self.shadow) = shadow;
    }

    /// Make subsequent reads fail, or succeed again with `None`.
    pub fn fail_with(&self, failure: Option<InjectedFailure>) {
        *lock(&self.failure) = failure;
    }
}

impl ButtonCloud for VirtualButton {
    async fn get_edges(&self) -> Result<ButtonEdgePair, HeatHubError> {
        if let Some(failure) = *lock(&self.failure) {
            return Err(failure.into_error(Collaborator::Button));
        }
        shadow::parse_edges(&lock(&self.shadow))
            .map_err(|err| HeatHubError::data_shape(Collaborator::Button, err))
    }
}
