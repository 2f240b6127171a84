//! Command dispatcher — applies a [`Decision`] to the boiler.
//!
//! In manual mode a single room-temperature write is enough. In clock mode
//! the boiler only honours a manual target while its override flag is on, so
//! three writes are issued in order: room temperature, override status,
//! override temperature. A failure after the first write leaves the boiler in
//! a known half-written state and is reported as a [`PartialWriteError`].

use heathub_domain::boiler::{BoilerStatus, ProgramMode};
use heathub_domain::decision::Decision;
use heathub_domain::error::{HeatHubError, PartialWriteError, WriteStep};

use crate::ports::BoilerControl;

const CLOCK_SEQUENCE: [WriteStep; 3] = [
    WriteStep::RoomTemperature,
    WriteStep::OverrideStatus,
    WriteStep::OverrideTemperature,
];

/// Outcome of a dispatch that did not fail on a write.
#[derive(Debug)]
pub enum Dispatch {
    /// The decision carried no target; the boiler was not touched.
    Unchanged,
    /// Every write landed and the refreshed status was read back.
    Applied(BoilerStatus),
    /// Every write landed but reading the status back failed.
    Unconfirmed(HeatHubError),
}

impl Dispatch {
    /// Refreshed status, when one was read.
    #[must_use]
    pub fn status(&self) -> Option<BoilerStatus> {
        match self {
            Self::Applied(status) => Some(*status),
            Self::Unchanged | Self::Unconfirmed(_) => None,
        }
    }
}

/// Apply `decision` to `boiler` and read the refreshed status back.
///
/// Returns [`Dispatch::Unchanged`] without touching the boiler when the
/// decision carries no target. Nothing is retried.
///
/// # Errors
///
/// A failed first write propagates the collaborator error unchanged. A failed
/// later write in clock mode returns [`HeatHubError::PartialWrite`]. A failed
/// status refresh is not an error: the writes stand and the outcome is
/// [`Dispatch::Unconfirmed`].
#[tracing::instrument(skip(decision, boiler), fields(target = ?decision.new_target_temperature))]
pub async fn apply<C: BoilerControl>(
    decision: &Decision,
    boiler: &C,
    program_mode: ProgramMode,
) -> Result<Dispatch, HeatHubError> {
    let Some(target) = decision.new_target_temperature else {
        return Ok(Dispatch::Unchanged);
    };

    match program_mode {
        ProgramMode::Manual => boiler.set_room_temperature(target).await?,
        ProgramMode::Clock => write_clock_sequence(boiler, target).await?,
    }

    match boiler.get_status().await {
        Ok(status) => {
            tracing::info!(set_point = status.set_point, "boiler target applied");
            Ok(Dispatch::Applied(status))
        }
        Err(err) => {
            tracing::warn!(%err, "boiler target written, status refresh failed");
            Ok(Dispatch::Unconfirmed(err))
        }
    }
}

async fn write_clock_sequence<C: BoilerControl>(
    boiler: &C,
    target: f64,
) -> Result<(), HeatHubError> {
    let mut completed = Vec::with_capacity(CLOCK_SEQUENCE.len());
    for step in CLOCK_SEQUENCE {
        let result = match step {
            WriteStep::RoomTemperature => boiler.set_room_temperature(target).await,
            WriteStep::OverrideStatus => boiler.set_override(true).await,
            WriteStep::OverrideTemperature => boiler.set_override_temperature(target).await,
        };
        if let Err(err) = result {
            if completed.is_empty() {
                return Err(err);
            }
            tracing::warn!(%step, completed = completed.len(), "boiler left half-written");
            return Err(PartialWriteError {
                completed,
                failed: step,
                source: Box::new(err),
            }
            .into());
        }
        completed.push(step);
    }
    Ok(())
}
