//! # heathub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ThermostatGateway` — poll room thermostats
//!   - `ButtonCloud` — read the button's last press edges
//!   - `BoilerControl` — read status and write targets/overrides
//!   - `FlagStore` / `LogStore` — the journal
//!   - `Clock` — local wall-clock time
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HeatingCycle` — one end-to-end evaluation cycle
//!   - `ButtonMonitor` — button edges to activation signal
//!   - `dispatcher::apply` — mode-aware boiler writes
//!   - `JournalService` — read access for the dashboard, retention
//!
//! ## Dependency rule
//! Depends on `heathub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
