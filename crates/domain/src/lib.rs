//! # heathub-domain
//!
//! Pure domain model for the heathub heating coordinator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **thermostat readings** and the "any room heating" signal
//! - Define **button edges** and the time-windowed activation evaluator
//! - Define **boiler status** and the **heating decision** rules
//! - Define **journal records** (flags and log entries)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod boiler;
pub mod button;
pub mod decision;
pub mod journal;
pub mod thermostat;
