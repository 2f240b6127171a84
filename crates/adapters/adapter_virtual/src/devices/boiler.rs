//! Virtual boiler — in-memory status with a write log.

use std::sync::Mutex;

use heathub_app::ports::BoilerControl;
use heathub_domain::boiler::{BoilerStatus, ProgramMode};
use heathub_domain::error::{Collaborator, HeatHubError, WriteStep};

use super::{InjectedFailure, lock};

/// A write acknowledged by the virtual boiler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoilerWrite {
    /// Manual room-temperature target.
    RoomTemperature(f64),
    /// Manual-override flag.
    OverrideStatus(bool),
    /// Manual-override temperature.
    OverrideTemperature(f64),
}

impl BoilerWrite {
    fn step(self) -> WriteStep {
        match self {
            Self::RoomTemperature(_) => WriteStep::RoomTemperature,
            Self::OverrideStatus(_) => WriteStep::OverrideStatus,
            Self::OverrideTemperature(_) => WriteStep::OverrideTemperature,
        }
    }
}

struct State {
    status: BoilerStatus,
    override_enabled: bool,
    override_temperature: Option<f64>,
}

/// A simulated boiler.
pub struct VirtualBoiler {
    state: Mutex<State>,
    writes: Mutex<Vec<BoilerWrite>>,
    failing_step: Mutex<Option<WriteStep>>,
    failure: Mutex<Option<InjectedFailure>>,
}

impl VirtualBoiler {
    /// Create a boiler with the given readings.
    #[must_use]
    pub fn new(current_temp: f64, set_point: f64, program_mode: ProgramMode) -> Self {
        Self {
            state: Mutex::new(State {
                status: BoilerStatus {
                    current_temp,
                    set_point,
                    program_mode,
                },
                override_enabled: false,
                override_temperature: None,
            }),
            writes: Mutex::new(Vec::new()),
            failing_step: Mutex::new(None),
            failure: Mutex::new(None),
        }
    }

    /// Simulate the room warming up or cooling down.
    pub fn set_current_temperature(&self, value: f64) {
        lock(&self.state).status.current_temp = value;
    }

    /// Make one kind of write fail, or none with `None`.
    pub fn fail_step(&self, step: Option<WriteStep>) {
        *lock(&self.failing_step) = step;
    }

    /// Make every call fail, or succeed again with `None`.
    pub fn fail_with(&self, failure: Option<InjectedFailure>) {
        *lock(&self.failure) = failure;
    }

    /// Acknowledged writes, in issue order.
    #[must_use]
    pub fn writes(&self) -> Vec<BoilerWrite> {
        lock(&self.writes).clone()
    }

    /// Whether the manual override is currently on.
    #[must_use]
    pub fn override_enabled(&self) -> bool {
        lock(&self.state).override_enabled
    }

    /// Last override temperature written, if any.
    #[must_use]
    pub fn override_temperature(&self) -> Option<f64> {
        lock(&self.state).override_temperature
    }

    fn check_reachable(&self) -> Result<(), HeatHubError> {
        match *lock(&self.failure) {
            Some(failure) => Err(failure.into_error(Collaborator::Boiler)),
            None => Ok(()),
        }
    }

    fn write(&self, write: BoilerWrite) -> Result<(), HeatHubError> {
        self.check_reachable()?;
        let step = write.step();
        if *lock(&self.failing_step) == Some(step) {
            return Err(HeatHubError::connectivity(
                Collaborator::Boiler,
                format!("simulated {step} write failure"),
            ));
        }

        let mut state = lock(&self.state);
        match write {
            BoilerWrite::RoomTemperature(value) => state.status.set_point = value,
            BoilerWrite::OverrideStatus(enabled) => state.override_enabled = enabled,
            BoilerWrite::OverrideTemperature(value) => {
                state.override_temperature = Some(value);
                if state.override_enabled {
                    state.status.set_point = value;
                }
            }
        }
        drop(state);

        lock(&self.writes).push(write);
        Ok(())
    }
}

impl BoilerControl for VirtualBoiler {
    async fn get_status(&self) -> Result<BoilerStatus, HeatHubError> {
        self.check_reachable()?;
        Ok(lock(&self.state).status)
    }

    async fn set_room_temperature(&self, value: f64) -> Result<(), HeatHubError> {
        self.write(BoilerWrite::RoomTemperature(value))
    }

    async fn set_override(&self, enabled: bool) -> Result<(), HeatHubError> {
        self.write(BoilerWrite::OverrideStatus(enabled))
    }

    async fn set_override_temperature(&self, value: f64) -> Result<(), HeatHubError> {
        self.write(BoilerWrite::OverrideTemperature(value))
    }
}
