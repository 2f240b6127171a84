//! JSON handlers for the journal log.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use heathub_app::ports::{FlagStore, LogStore};
use heathub_domain::journal::LogEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// Entries returned when no `limit` is given.
pub const DEFAULT_LIMIT: usize = 100;

/// Query string of the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of entries, capped server-side.
    pub limit: Option<usize>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<LogEntry>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/logs?limit=N` — most recent log entries, newest first.
pub async fn list<J>(
    State(state): State<AppState<J>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let logs = state.journal.recent_logs(limit).await?;
    Ok(ListResponse::Ok(Json(logs)))
}
