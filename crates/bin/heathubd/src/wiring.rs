//! Collaborator construction from configuration.

use chrono::{DateTime, Duration, Utc};

use heathub_adapter_virtual::{VirtualBoiler, VirtualButton, VirtualGateway};
use heathub_app::ports::{FlagStore, LogStore, SystemClock};
use heathub_app::services::button_monitor::ButtonMonitor;
use heathub_app::services::heating_cycle::HeatingCycle;
use heathub_domain::thermostat::ThermostatReading;

use crate::config::{Config, ConfigError, VirtualConfig};

/// Heating cycle wired to the simulated collaborators.
pub type VirtualCycle<J> =
    HeatingCycle<VirtualGateway, VirtualButton, VirtualBoiler, J, SystemClock>;

/// Build the heating cycle for `config`, writing to `journal`.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when the policy or button settings
/// are invalid.
pub fn build_cycle<J>(
    config: &Config,
    journal: J,
    now: DateTime<Utc>,
) -> Result<VirtualCycle<J>, ConfigError>
where
    J: FlagStore + LogStore,
{
    let simulation = &config.simulation;
    let cycle = HeatingCycle::new(
        gateway(simulation),
        boiler(simulation),
        journal,
        SystemClock,
        config.policy()?,
    );

    if !config.button.enabled {
        return Ok(cycle);
    }
    let monitor = ButtonMonitor::new(button(simulation, now), config.button_evaluator()?);
    Ok(cycle.with_button(monitor))
}

fn gateway(simulation: &VirtualConfig) -> VirtualGateway {
    let readings = simulation
        .rooms
        .iter()
        .enumerate()
        .map(|(index, room)| ThermostatReading {
            device_id: format!("virtual-{index}"),
            name: room.name.clone(),
            hvac_action: room.hvac_action,
            current_temperature: room.current_temperature,
            target_temperature: room.target_temperature,
        })
        .collect();
    VirtualGateway::new(readings)
}

fn boiler(simulation: &VirtualConfig) -> VirtualBoiler {
    VirtualBoiler::new(
        simulation.boiler_current_temp,
        simulation.boiler_set_point,
        simulation.program_mode,
    )
}

fn button(simulation: &VirtualConfig, now: DateTime<Utc>) -> VirtualButton {
    let pressed_at = |minutes_ago: Option<i64>| {
        minutes_ago.map(|minutes| (now - Duration::minutes(minutes)).timestamp())
    };
    VirtualButton::from_presses(
        pressed_at(simulation.button_up_minutes_ago),
        pressed_at(simulation.button_down_minutes_ago),
    )
}
