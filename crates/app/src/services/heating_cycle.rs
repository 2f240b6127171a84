//! Heating cycle — one end-to-end evaluation of the heating rules.
//!
//! A cycle polls the thermostat gateway, optionally checks the button, reads
//! the boiler, decides, and dispatches. Collaborator calls are issued one at
//! a time. A gateway or boiler failure aborts the rest of the cycle; a button
//! failure only degrades the button signal to [`ButtonSignal::Unknown`].
//!
//! Journal writes (flags and log lines) never fail a cycle: errors are traced
//! and dropped.

use std::error::Error as StdError;

use chrono::{DateTime, FixedOffset};
use heathub_domain::boiler::BoilerStatus;
use heathub_domain::button::ButtonActivation;
use heathub_domain::decision::{Decision, DecisionReason, HeatingPolicy};
use heathub_domain::error::{Collaborator, HeatHubError};
use heathub_domain::journal::{
    FLAG_LAST_APP_RUN, FLAG_LAST_BUTTON_ON, FLAG_LAST_HEAT_ON, Flag, LogEntry,
};
use heathub_domain::thermostat::first_heating;
use heathub_domain::time::Timestamp;

use crate::ports::{BoilerControl, ButtonCloud, Clock, FlagStore, LogStore, ThermostatGateway};
use crate::services::button_monitor::{ButtonMonitor, ButtonSignal};
use crate::services::dispatcher::{self, Dispatch};

/// What happened during one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Whether any room thermostat was calling for heat.
    pub thermostat_active: bool,
    /// Button contribution.
    pub button: ButtonSignal,
    /// Boiler status read before deciding.
    pub boiler: BoilerStatus,
    /// The decision taken.
    pub decision: Decision,
    /// Boiler status read back after dispatch. `None` when nothing was
    /// written, or when the writes landed but the read-back failed.
    pub applied: Option<BoilerStatus>,
}

/// Runs heating cycles against injected collaborators.
pub struct HeatingCycle<G, B, C, J, K> {
    gateway: G,
    button: Option<ButtonMonitor<B>>,
    boiler: C,
    journal: J,
    clock: K,
    policy: HeatingPolicy,
}

impl<G, B, C, J, K> HeatingCycle<G, B, C, J, K>
where
    G: ThermostatGateway,
    B: ButtonCloud,
    C: BoilerControl,
    J: FlagStore + LogStore,
    K: Clock,
{
    /// Create a cycle without a button.
    pub fn new(gateway: G, boiler: C, journal: J, clock: K, policy: HeatingPolicy) -> Self {
        Self {
            gateway,
            button: None,
            boiler,
            journal,
            clock,
            policy,
        }
    }

    /// Attach a button monitor.
    #[must_use]
    pub fn with_button(mut self, monitor: ButtonMonitor<B>) -> Self {
        self.button = Some(monitor);
        self
    }

    /// Borrow the journal the cycle writes to.
    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Run one cycle.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when polling fails, the boiler error when
    /// the status read fails, and the dispatch error (including
    /// [`HeatHubError::PartialWrite`]) when a boiler write fails. A failed
    /// read-back after successful writes is journaled, not returned.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<CycleReport, HeatHubError> {
        let now = self.clock.now();
        self.flag(FLAG_LAST_APP_RUN, &now).await;
        self.info(Collaborator::Gateway, "Gateway run").await;

        let thermostat_active = self.thermostat_signal().await?;
        let button = self.button_signal(&now).await;

        self.info(Collaborator::Boiler, "Boiler run").await;
        let boiler = match self.boiler.get_status().await {
            Ok(status) => status,
            Err(err) => {
                self.error(
                    Collaborator::Boiler,
                    format!("Boiler status unavailable: {}", describe(&err)),
                )
                .await;
                return Err(err);
            }
        };

        let decision = self
            .policy
            .decide(thermostat_active, button.is_active(), &boiler);
        tracing::info!(
            thermostat_active,
            %button,
            reason = %decision.reason,
            target = ?decision.new_target_temperature,
            "heating decision"
        );
        self.record_decision(&decision, &boiler, &now).await;

        let dispatch = match dispatcher::apply(&decision, &self.boiler, boiler.program_mode).await
        {
            Ok(dispatch) => dispatch,
            Err(err) => {
                self.error(
                    Collaborator::Boiler,
                    format!("Boiler write failed: {}", describe(&err)),
                )
                .await;
                return Err(err);
            }
        };

        match (decision.new_target_temperature, &dispatch) {
            (Some(target), Dispatch::Applied(status)) => {
                self.info(
                    Collaborator::Boiler,
                    format!(
                        "Temperature set to {target:.1}; boiler set point {:.1}",
                        status.set_point
                    ),
                )
                .await;
            }
            (Some(target), Dispatch::Unconfirmed(err)) => {
                self.error(
                    Collaborator::Boiler,
                    format!(
                        "Temperature set to {target:.1}; boiler status refresh failed: {}",
                        describe(err)
                    ),
                )
                .await;
            }
            _ => {}
        }
        let applied = dispatch.status();
        self.info(Collaborator::Boiler, "Boiler run end").await;

        Ok(CycleReport {
            thermostat_active,
            button,
            boiler,
            decision,
            applied,
        })
    }

    async fn thermostat_signal(&self) -> Result<bool, HeatHubError> {
        let readings = match self.gateway.poll().await {
            Ok(readings) => readings,
            Err(err) => {
                self.error(Collaborator::Gateway, gateway_failure_message(&err))
                    .await;
                return Err(err);
            }
        };
        tracing::debug!(rooms = readings.len(), "gateway polled");

        match first_heating(&readings) {
            Some(room) => {
                self.info(
                    Collaborator::Gateway,
                    format!(
                        "Heat requested by {}: current {:.1}, target {:.1}",
                        room.name, room.current_temperature, room.target_temperature
                    ),
                )
                .await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn button_signal(&self, now: &DateTime<FixedOffset>) -> ButtonSignal {
        let Some(monitor) = &self.button else {
            return ButtonSignal::Disabled;
        };
        self.info(Collaborator::Button, "Button run").await;

        let check = match monitor.check(now).await {
            Ok(check) => check,
            Err(err) => {
                tracing::warn!(%err, "button signal unavailable");
                self.error(
                    Collaborator::Button,
                    format!("Button status unavailable: {}", describe(&err)),
                )
                .await;
                return ButtonSignal::Unknown;
            }
        };

        match check.activation {
            ButtonActivation::On => {
                let minutes = monitor.evaluator().working_duration_minutes();
                self.info(
                    Collaborator::Button,
                    format!(
                        "Button up pressed at {}; down pressed at {}; working window {minutes} min",
                        format_edge(check.edges.up_pressed_at, now),
                        format_edge(check.edges.down_pressed_at, now),
                    ),
                )
                .await;
                self.flag(FLAG_LAST_BUTTON_ON, now).await;
            }
            ButtonActivation::Suppressed => {
                let quiet = monitor.evaluator().quiet_hours();
                self.info(
                    Collaborator::Button,
                    format!(
                        "Button press ignored during quiet hours ({} - {})",
                        quiet.start().format("%H:%M"),
                        quiet.end().format("%H:%M")
                    ),
                )
                .await;
            }
            ButtonActivation::Off => {}
        }
        self.info(
            Collaborator::Button,
            format!("Button status: {}", check.activation.as_str()),
        )
        .await;

        ButtonSignal::Activation(check.activation)
    }

    async fn record_decision(
        &self,
        decision: &Decision,
        boiler: &BoilerStatus,
        now: &DateTime<FixedOffset>,
    ) {
        let message = match (decision.reason, decision.new_target_temperature) {
            (DecisionReason::HeatOnEscalate, Some(target)) => format!(
                "Heat on: raising target to {target:.1} (current {:.1}, set point {:.1})",
                boiler.current_temp, boiler.set_point
            ),
            (DecisionReason::HeatOnAlreadySatisfiedBySetpoint, _) => format!(
                "Heat on: boiler below set point (current {:.1}, set point {:.1}), no change",
                boiler.current_temp, boiler.set_point
            ),
            (DecisionReason::HeatOffSetback, Some(target)) => {
                format!("Heat off: setting back to {target:.1}")
            }
            (reason, _) => format!("Heat off: no change ({reason})"),
        };
        self.info(Collaborator::Boiler, message).await;

        if decision.reason == DecisionReason::HeatOnEscalate {
            self.flag(FLAG_LAST_HEAT_ON, now).await;
        }
    }

    async fn info(&self, device: Collaborator, message: impl Into<String>) {
        self.append(LogEntry::info(device, message)).await;
    }

    async fn error(&self, device: Collaborator, message: impl Into<String>) {
        self.append(LogEntry::error(device, message)).await;
    }

    async fn append(&self, entry: LogEntry) {
        if let Err(err) = self.journal.append(entry).await {
            tracing::warn!(%err, "failed to append journal entry");
        }
    }

    async fn flag(&self, key: &str, at: &DateTime<FixedOffset>) {
        let flag = match Flag::timestamped(key, at) {
            Ok(flag) => flag,
            Err(err) => {
                tracing::warn!(%err, key, "invalid journal flag");
                return;
            }
        };
        if let Err(err) = self.journal.set_flag(flag).await {
            tracing::warn!(%err, key, "failed to record journal flag");
        }
    }
}

fn gateway_failure_message(err: &HeatHubError) -> String {
    match err {
        HeatHubError::Connectivity { .. } => {
            "Connection error: check the gateway address".to_string()
        }
        HeatHubError::Authentication { .. } => {
            "Authentication error: check the gateway credentials".to_string()
        }
        other => format!("Unexpected gateway error: {}", describe(other)),
    }
}

fn format_edge(edge: Option<Timestamp>, now: &DateTime<FixedOffset>) -> String {
    edge.map_or_else(
        || "never".to_string(),
        |ts| {
            ts.with_timezone(now.offset())
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

/// Render an error with its source chain, `outer: inner: root`.
fn describe(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
