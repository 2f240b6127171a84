//! End-to-end smoke tests for the full heathubd stack.
//!
//! Each test wires the complete application (in-memory `SQLite`, virtual
//! collaborators, real services, real axum router), runs heating cycles and
//! reads the journal back through the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, FixedOffset};
use http_body_util::BodyExt;
use heathub_adapter_http_axum::router;
use heathub_adapter_http_axum::state::AppState;
use heathub_adapter_storage_sqlite_sqlx::{Config, SqliteJournal};
use heathub_adapter_virtual::{
    BoilerWrite, InjectedFailure, VirtualBoiler, VirtualButton, VirtualGateway,
};
use heathub_app::ports::Clock;
use heathub_app::services::button_monitor::{ButtonMonitor, ButtonSignal};
use heathub_app::services::heating_cycle::HeatingCycle;
use heathub_app::services::journal_service::JournalService;
use heathub_domain::boiler::ProgramMode;
use heathub_domain::button::{ButtonActivation, ButtonEvaluator, QuietHours};
use heathub_domain::decision::{DecisionReason, HeatingPolicy};
use heathub_domain::error::{HeatHubError, WriteStep};
use heathub_domain::thermostat::{HvacAction, ThermostatReading};
use tower::ServiceExt;

struct FixedClock(DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

fn evening() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-02-10T18:00:00+01:00").unwrap()
}

type Cycle = HeatingCycle<
    Arc<VirtualGateway>,
    Arc<VirtualButton>,
    Arc<VirtualBoiler>,
    SqliteJournal,
    FixedClock,
>;

struct Stack {
    gateway: Arc<VirtualGateway>,
    button: Arc<VirtualButton>,
    boiler: Arc<VirtualBoiler>,
    cycle: Cycle,
    journal: Arc<JournalService<SqliteJournal>>,
}

impl Stack {
    fn router(&self) -> axum::Router {
        router::build(AppState::from_arc(Arc::clone(&self.journal)))
    }
}

/// Build a fully-wired stack backed by an in-memory `SQLite` database.
async fn stack(program_mode: ProgramMode, now: DateTime<FixedOffset>) -> Stack {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");
    let journal = SqliteJournal::new(db.pool().clone());

    let gateway = Arc::new(VirtualGateway::default());
    let button = Arc::new(VirtualButton::default());
    let boiler = Arc::new(VirtualBoiler::new(20.0, 20.0, program_mode));

    let monitor = ButtonMonitor::new(
        Arc::clone(&button),
        ButtonEvaluator::new(30.0, QuietHours::default()).unwrap(),
    );
    let cycle = HeatingCycle::new(
        Arc::clone(&gateway),
        Arc::clone(&boiler),
        journal.clone(),
        FixedClock(now),
        HeatingPolicy::default(),
    )
    .with_button(monitor);

    Stack {
        gateway,
        button,
        boiler,
        cycle,
        journal: Arc::new(JournalService::new(journal)),
    }
}

fn room(name: &str, hvac_action: HvacAction) -> ThermostatReading {
    ThermostatReading {
        device_id: name.to_lowercase(),
        name: name.to_string(),
        hvac_action,
        current_temperature: 18.5,
        target_temperature: 21.0,
    }
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_html(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let resp = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ---------------------------------------------------------------------------
// Heating cycles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_escalate_in_clock_mode_and_journal_it() {
    let stack = stack(ProgramMode::Clock, evening()).await;
    stack
        .gateway
        .set_readings(vec![room("Bathroom", HvacAction::Heating)]);

    let report = stack.cycle.run().await.unwrap();

    assert!(report.thermostat_active);
    assert_eq!(report.decision.reason, DecisionReason::HeatOnEscalate);
    assert_eq!(
        stack.boiler.writes(),
        vec![
            BoilerWrite::RoomTemperature(22.0),
            BoilerWrite::OverrideStatus(true),
            BoilerWrite::OverrideTemperature(22.0),
        ]
    );

    let (status, flags) = get_json(stack.router(), "/api/flags").await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = flags
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["last_date_app_run", "last_date_heat_on"]);

    let (_, flag) = get_json(stack.router(), "/api/flags/last_date_heat_on").await;
    assert_eq!(flag["value"], "2024-02-10 18:00:00");
}

#[tokio::test]
async fn should_turn_heat_on_from_button_press() {
    let now = evening();
    let stack = stack(ProgramMode::Manual, now).await;
    stack
        .button
        .set_shadow(heathub_adapter_virtual::shadow::document(
            Some(now.timestamp() - 600),
            Some(now.timestamp() - 3600),
        ));

    let report = stack.cycle.run().await.unwrap();

    assert_eq!(report.button, ButtonSignal::Activation(ButtonActivation::On));
    assert_eq!(stack.boiler.writes(), vec![BoilerWrite::RoomTemperature(22.0)]);
    let (status, _) = get_json(stack.router(), "/api/flags/last_date_button_on").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn should_degrade_malformed_button_shadow_to_unknown() {
    let stack = stack(ProgramMode::Manual, evening()).await;
    stack.button.set_shadow(serde_json::json!({ "state": {} }));
    stack.boiler.set_current_temperature(16.0);

    let report = stack.cycle.run().await.unwrap();

    assert_eq!(report.button, ButtonSignal::Unknown);
    assert_eq!(report.decision.reason, DecisionReason::HeatOffSetback);
    let (status, _) = get_json(stack.router(), "/api/flags/last_date_button_on").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_abort_cycle_and_log_when_gateway_unreachable() {
    let stack = stack(ProgramMode::Manual, evening()).await;
    stack.gateway.fail_with(Some(InjectedFailure::Unreachable));

    let err = stack.cycle.run().await.unwrap_err();
    assert!(matches!(err, HeatHubError::Connectivity { .. }));
    assert!(stack.boiler.writes().is_empty());

    let (_, logs) = get_json(stack.router(), "/api/logs").await;
    let newest = &logs.as_array().unwrap()[0];
    assert_eq!(newest["severity"], "error");
    assert_eq!(newest["device"], "gateway");
    assert!(
        newest["message"]
            .as_str()
            .unwrap()
            .contains("check the gateway address")
    );
}

#[tokio::test]
async fn should_report_partial_write_when_override_fails() {
    let stack = stack(ProgramMode::Clock, evening()).await;
    stack
        .gateway
        .set_readings(vec![room("Bathroom", HvacAction::Heating)]);
    stack.boiler.fail_step(Some(WriteStep::OverrideStatus));

    let err = stack.cycle.run().await.unwrap_err();

    let HeatHubError::PartialWrite(partial) = err else {
        panic!("expected a partial write");
    };
    assert_eq!(partial.failed, WriteStep::OverrideStatus);
    assert_eq!(partial.completed, vec![WriteStep::RoomTemperature]);
    assert_eq!(stack.boiler.writes(), vec![BoilerWrite::RoomTemperature(22.0)]);
}

#[tokio::test]
async fn should_suppress_button_during_quiet_hours() {
    let night = DateTime::parse_from_rfc3339("2024-02-10T23:30:00+01:00").unwrap();
    let stack = stack(ProgramMode::Manual, night).await;
    stack
        .button
        .set_shadow(heathub_adapter_virtual::shadow::document(
            Some(night.timestamp() - 60),
            None,
        ));

    let report = stack.cycle.run().await.unwrap();

    assert_eq!(
        report.button,
        ButtonSignal::Activation(ButtonActivation::Suppressed)
    );
    assert_eq!(report.decision.reason, DecisionReason::HeatOffNoop);
    assert!(stack.boiler.writes().is_empty());
}

// ---------------------------------------------------------------------------
// Journal retention & dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_keep_only_newest_logs_after_retention() {
    let stack = stack(ProgramMode::Manual, evening()).await;
    for _ in 0..3 {
        stack.cycle.run().await.unwrap();
    }

    let removed = stack.journal.enforce_retention(4).await.unwrap();
    assert!(removed > 0);

    let (_, logs) = get_json(stack.router(), "/api/logs?limit=50").await;
    assert_eq!(logs.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let stack = stack(ProgramMode::Manual, evening()).await;
    let (status, body) = get_html(stack.router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn should_render_dashboard_after_cycle() {
    let stack = stack(ProgramMode::Manual, evening()).await;
    stack.cycle.run().await.unwrap();

    let (status, body) = get_html(stack.router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("heathub"));
    assert!(body.contains("last_date_app_run"));
    assert!(body.contains("Gateway run"));
    assert!(body.contains(r#"http-equiv="refresh""#));
}
