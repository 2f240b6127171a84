//! Dashboard home page — journal flags and the most recent log lines.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use chrono::Local;

use heathub_app::ports::{FlagStore, LogStore};
use heathub_domain::journal::{Flag, LogEntry, Severity};
use heathub_domain::time::Timestamp;

use super::DashboardError;
use crate::state::AppState;

/// Log lines shown on the home page.
pub const PAGE_LOGS: usize = 100;

/// A flag as displayed.
pub struct FlagRow {
    key: String,
    value: String,
    last_write: String,
}

impl From<Flag> for FlagRow {
    fn from(flag: Flag) -> Self {
        let value = match flag.value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        Self {
            key: flag.key,
            value,
            last_write: local_time(&flag.last_write),
        }
    }
}

/// A log line as displayed.
pub struct LogRow {
    time: String,
    device: &'static str,
    severity: &'static str,
    is_error: bool,
    message: String,
}

impl From<LogEntry> for LogRow {
    fn from(entry: LogEntry) -> Self {
        Self {
            time: local_time(&entry.timestamp),
            device: entry.device.as_str(),
            severity: entry.severity.as_str(),
            is_error: entry.severity == Severity::Error,
            message: entry.message,
        }
    }
}

fn local_time(ts: &Timestamp) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u32,
    flags: Vec<FlagRow>,
    logs: Vec<LogRow>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — journal overview.
pub async fn index<J>(State(state): State<AppState<J>>) -> Result<HomeTemplate, DashboardError>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    let flags = state.journal.flags().await?;
    let logs = state.journal.recent_logs(PAGE_LOGS).await?;

    Ok(HomeTemplate {
        refresh_seconds: state.refresh_seconds,
        flags: flags.into_iter().map(FlagRow::from).collect(),
        logs: logs.into_iter().map(LogRow::from).collect(),
    })
}
