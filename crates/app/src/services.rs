//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod button_monitor;
pub mod dispatcher;
pub mod heating_cycle;
pub mod journal_service;
