//! Button activation evaluator.
//!
//! A wireless button reports its last "up" and "down" presses through a cloud
//! shadow. Pressing "up" asks for heat for a configured working duration;
//! pressing "down" cancels it. Presses during [`QuietHours`] are ignored so
//! a stray night-time trigger never turns the heating on.

mod quiet_hours;

pub use quiet_hours::{DEFAULT_QUIET_END, DEFAULT_QUIET_START, QuietHours};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// Most recent rising/falling edges of the button.
///
/// Either edge may be missing when the device has never reported it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEdgePair {
    /// Last time the "up" (heat on) side was pressed.
    pub up_pressed_at: Option<Timestamp>,
    /// Last time the "down" (heat off) side was pressed.
    pub down_pressed_at: Option<Timestamp>,
}

impl ButtonEdgePair {
    /// The up-press timestamp when it is the latest event.
    ///
    /// A missing down edge counts as older than any up edge.
    #[must_use]
    pub fn rising_edge(&self) -> Option<Timestamp> {
        let up = self.up_pressed_at?;
        match self.down_pressed_at {
            Some(down) if down >= up => None,
            _ => Some(up),
        }
    }
}

/// Outcome of evaluating the button edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonActivation {
    /// Heat was requested and the working window is still open.
    On,
    /// No active request (down pressed last, window expired, or no data).
    Off,
    /// Inside quiet hours; presses are ignored.
    Suppressed,
}

impl ButtonActivation {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Suppressed => "suppressed",
        }
    }
}

/// Decides whether a button press is still asking for heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvaluator {
    working_duration_minutes: f64,
    quiet_hours: QuietHours,
}

impl ButtonEvaluator {
    /// Build an evaluator for the given working window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWorkingDuration`] unless the duration
    /// is finite and strictly positive.
    pub fn new(
        working_duration_minutes: f64,
        quiet_hours: QuietHours,
    ) -> Result<Self, ValidationError> {
        if !working_duration_minutes.is_finite() || working_duration_minutes <= 0.0 {
            return Err(ValidationError::InvalidWorkingDuration(
                working_duration_minutes,
            ));
        }
        Ok(Self {
            working_duration_minutes,
            quiet_hours,
        })
    }

    /// Configured working window in minutes.
    #[must_use]
    pub fn working_duration_minutes(&self) -> f64 {
        self.working_duration_minutes
    }

    /// Configured quiet hours.
    #[must_use]
    pub fn quiet_hours(&self) -> QuietHours {
        self.quiet_hours
    }

    /// Evaluate `edges` at `now`.
    ///
    /// Quiet hours are checked against the wall-clock time of `now` in its
    /// own time zone, so callers pass local time.
    pub fn evaluate<Tz: TimeZone>(
        &self,
        edges: &ButtonEdgePair,
        now: &DateTime<Tz>,
    ) -> ButtonActivation {
        if self.quiet_hours.contains(now.time()) {
            return ButtonActivation::Suppressed;
        }

        let Some(up) = edges.rising_edge() else {
            return ButtonActivation::Off;
        };

        let elapsed = elapsed_minutes(up, &now.with_timezone(&Utc));
        if (0.0..self.working_duration_minutes).contains(&elapsed) {
            ButtonActivation::On
        } else {
            ButtonActivation::Off
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn elapsed_minutes(since: Timestamp, now: &Timestamp) -> f64 {
    now.signed_duration_since(since).num_milliseconds() as f64 / 60_000.0
}
