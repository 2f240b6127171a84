//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! Every collaborator call either returns a value or fails; retries and
//! timeouts belong to the adapter.

pub mod boiler;
pub mod button;
pub mod clock;
pub mod gateway;
pub mod journal;

pub use boiler::BoilerControl;
pub use button::ButtonCloud;
pub use clock::{Clock, SystemClock};
pub use gateway::ThermostatGateway;
pub use journal::{FlagStore, LogStore};
