//! # heathub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** over the journal (`/api/logs`, `/api/flags`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: the home page lists the journal flags and the most
//!   recent log lines, and reloads itself with
//!   `<meta http-equiv="refresh" content="N">`
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! The dashboard is read-only. It never talks to the thermostat gateway,
//! the button cloud or the boiler.
//!
//! ## Dependency rule
//! Depends on `heathub-app` (for port traits and services) and `heathub-domain`
//! (for domain types used in response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
