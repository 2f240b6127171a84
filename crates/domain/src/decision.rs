//! Heating decision engine.
//!
//! Turns the thermostat and button signals plus the live boiler status into
//! at most one new boiler target per cycle. Rules, first match wins:
//!
//! 1. Heat is wanted and the boiler already reached its set point: push the
//!    target [`HeatingPolicy::escalation_delta`] above the *current* reading
//!    so the boiler's own hysteresis sees a new call for heat.
//! 2. Heat is wanted and the boiler is below its set point: leave it alone.
//! 3. No heat wanted and the boiler is below its set point: drop to the
//!    setback temperature.
//! 4. Otherwise nothing changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::boiler::BoilerStatus;
use crate::error::ValidationError;

/// Degrees added to the current reading when escalating.
pub const DEFAULT_ESCALATION_DELTA: f64 = 2.0;

/// Target used when no demand signal is present.
pub const DEFAULT_SETBACK_TEMPERATURE: f64 = 17.0;

/// Why a [`Decision`] was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Heat wanted, boiler satisfied: raise the target above the reading.
    HeatOnEscalate,
    /// Heat wanted, boiler still below its set point.
    HeatOnAlreadySatisfiedBySetpoint,
    /// No heat wanted, boiler below its set point: apply setback.
    HeatOffSetback,
    /// No heat wanted, nothing to change.
    HeatOffNoop,
}

impl DecisionReason {
    /// Stable snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeatOnEscalate => "heat_on_escalate",
            Self::HeatOnAlreadySatisfiedBySetpoint => "heat_on_already_satisfied_by_setpoint",
            Self::HeatOffSetback => "heat_off_setback",
            Self::HeatOffNoop => "heat_off_noop",
        }
    }

    /// Whether this reason corresponds to heat being wanted.
    #[must_use]
    pub fn is_heat_on(self) -> bool {
        matches!(
            self,
            Self::HeatOnEscalate | Self::HeatOnAlreadySatisfiedBySetpoint
        )
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one evaluation cycle.
///
/// An absent target means "no change", never "unset".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// New boiler target, if any.
    pub new_target_temperature: Option<f64>,
    /// Which rule fired.
    pub reason: DecisionReason,
}

impl Decision {
    /// A decision that leaves the boiler untouched.
    #[must_use]
    pub fn no_change(reason: DecisionReason) -> Self {
        Self {
            new_target_temperature: None,
            reason,
        }
    }

    /// A decision that sets a new target.
    #[must_use]
    pub fn set(target: f64, reason: DecisionReason) -> Self {
        Self {
            new_target_temperature: Some(target),
            reason,
        }
    }
}

/// Tunable constants of the decision rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatingPolicy {
    escalation_delta: f64,
    setback_temperature: f64,
}

impl Default for HeatingPolicy {
    fn default() -> Self {
        Self {
            escalation_delta: DEFAULT_ESCALATION_DELTA,
            setback_temperature: DEFAULT_SETBACK_TEMPERATURE,
        }
    }
}

impl HeatingPolicy {
    /// Build a policy from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteTemperature`] when either value is
    /// NaN or infinite.
    pub fn new(escalation_delta: f64, setback_temperature: f64) -> Result<Self, ValidationError> {
        if !escalation_delta.is_finite() {
            return Err(ValidationError::NonFiniteTemperature {
                field: "escalation_delta",
                value: escalation_delta,
            });
        }
        if !setback_temperature.is_finite() {
            return Err(ValidationError::NonFiniteTemperature {
                field: "setback_temperature",
                value: setback_temperature,
            });
        }
        Ok(Self {
            escalation_delta,
            setback_temperature,
        })
    }

    /// Degrees added to the current reading when escalating.
    #[must_use]
    pub fn escalation_delta(&self) -> f64 {
        self.escalation_delta
    }

    /// Setback target.
    #[must_use]
    pub fn setback_temperature(&self) -> f64 {
        self.setback_temperature
    }

    /// Apply the rules. Pure: same inputs, same decision.
    #[must_use]
    pub fn decide(
        &self,
        thermostat_active: bool,
        button_active: bool,
        boiler: &BoilerStatus,
    ) -> Decision {
        if thermostat_active || button_active {
            if boiler.is_at_or_above_set_point() {
                Decision::set(
                    boiler.current_temp + self.escalation_delta,
                    DecisionReason::HeatOnEscalate,
                )
            } else {
                Decision::no_change(DecisionReason::HeatOnAlreadySatisfiedBySetpoint)
            }
        } else if boiler.current_temp < boiler.set_point {
            Decision::set(self.setback_temperature, DecisionReason::HeatOffSetback)
        } else {
            Decision::no_change(DecisionReason::HeatOffNoop)
        }
    }
}

/// [`HeatingPolicy::decide`] with the default policy.
#[must_use]
pub fn decide(thermostat_active: bool, button_active: bool, boiler: &BoilerStatus) -> Decision {
    HeatingPolicy::default().decide(thermostat_active, button_active, boiler)
}
