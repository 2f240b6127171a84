//! JSON handlers for journal flags.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use heathub_app::ports::{FlagStore, LogStore};
use heathub_domain::journal::Flag;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Flag>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Flag>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/flags` — all flags, ordered by key.
pub async fn list<J>(State(state): State<AppState<J>>) -> Result<ListResponse, ApiError>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    let flags = state.journal.flags().await?;
    Ok(ListResponse::Ok(Json(flags)))
}

/// `GET /api/flags/{key}` — a single flag.
pub async fn get<J>(
    State(state): State<AppState<J>>,
    Path(key): Path<String>,
) -> Result<GetResponse, ApiError>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    let flag = state.journal.flag(&key).await?;
    Ok(GetResponse::Ok(Json(flag)))
}
