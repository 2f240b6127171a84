//! Simulated collaborators.

mod boiler;
mod button;
mod gateway;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use boiler::{BoilerWrite, VirtualBoiler};
pub use button::VirtualButton;
pub use gateway::VirtualGateway;

use heathub_domain::error::{Collaborator, HeatHubError};

/// Failure a virtual collaborator can be told to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// Behave as if the collaborator could not be reached.
    Unreachable,
    /// Behave as if the credentials were rejected.
    Unauthorized,
}

impl InjectedFailure {
    fn into_error(self, collaborator: Collaborator) -> HeatHubError {
        match self {
            Self::Unreachable => {
                HeatHubError::connectivity(collaborator, "simulated connection failure")
            }
            Self::Unauthorized => {
                HeatHubError::authentication(collaborator, "simulated credential rejection")
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
