//! # heathub-adapter-virtual
//!
//! Virtual/demo collaborators that stand in for the real thermostat gateway,
//! button cloud and boiler, for testing and demonstration purposes.
//!
//! ## Provided collaborators
//!
//! | Collaborator | Port | Behaviour |
//! |--------------|------|-----------|
//! | [`VirtualGateway`] | `ThermostatGateway` | Returns a configurable list of room readings |
//! | [`VirtualButton`] | `ButtonCloud` | Parses a cloud-shadow JSON document into button edges |
//! | [`VirtualBoiler`] | `BoilerControl` | Keeps an in-memory status and records every write |
//!
//! Each collaborator can be told to fail so error paths are reachable
//! without real hardware.
//!
//! ## Dependency rule
//!
//! Depends on `heathub-app` (port traits) and `heathub-domain` only.

mod devices;
pub mod shadow;

pub use devices::{BoilerWrite, InjectedFailure, VirtualBoiler, VirtualButton, VirtualGateway};
