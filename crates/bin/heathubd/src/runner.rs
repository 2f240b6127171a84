//! Cycle scheduling: one-shot (cron) mode and the interval loop.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use heathub_app::ports::{BoilerControl, ButtonCloud, Clock, FlagStore, LogStore, ThermostatGateway};
use heathub_app::services::heating_cycle::{CycleReport, HeatingCycle};
use heathub_app::services::journal_service::JournalService;
use heathub_domain::error::HeatHubError;

/// Run one cycle, then trim the journal to `max_log_entries`.
///
/// Retention runs whatever the cycle outcome; its own failure is only traced.
///
/// # Errors
///
/// Returns the cycle error unchanged.
pub async fn tick<G, B, C, J, K, S>(
    cycle: &HeatingCycle<G, B, C, J, K>,
    journal: &JournalService<S>,
    max_log_entries: usize,
) -> Result<CycleReport, HeatHubError>
where
    G: ThermostatGateway,
    B: ButtonCloud,
    C: BoilerControl,
    J: FlagStore + LogStore,
    K: Clock,
    S: FlagStore + LogStore,
{
    let outcome = cycle.run().await;
    match &outcome {
        Ok(report) => tracing::info!(
            reason = %report.decision.reason,
            target = ?report.decision.new_target_temperature,
            "heating cycle completed"
        ),
        Err(err) => tracing::error!(error = %err, "heating cycle aborted"),
    }

    if let Err(err) = journal.enforce_retention(max_log_entries).await {
        tracing::warn!(error = %err, "journal retention failed");
    }
    outcome
}

/// Run a cycle every `period` until `shutdown` resolves.
///
/// Ticks are awaited one after the other, so cycles never overlap; a tick
/// that falls due while a cycle is still running is skipped. Returns the
/// number of cycles started.
pub async fn run_every<G, B, C, J, K, S>(
    cycle: &HeatingCycle<G, B, C, J, K>,
    journal: &JournalService<S>,
    max_log_entries: usize,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> u64
where
    G: ThermostatGateway,
    B: ButtonCloud,
    C: BoilerControl,
    J: FlagStore + LogStore,
    K: Clock,
    S: FlagStore + LogStore,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    loop {
        tokio::select! {
            () = &mut shutdown => {
                tracing::info!(cycles, "scheduler stopping");
                return cycles;
            }
            _ = interval.tick() => {
                cycles += 1;
                // Errors are already traced and journaled; the next tick retries.
                let _ = tick(cycle, journal, max_log_entries).await;
            }
        }
    }
}
