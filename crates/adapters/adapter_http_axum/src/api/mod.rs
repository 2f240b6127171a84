//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod flags;
#[allow(clippy::missing_errors_doc)]
pub mod logs;

use axum::Router;
use axum::routing::get;

use heathub_app::ports::{FlagStore, LogStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<J>() -> Router<AppState<J>>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    Router::new()
        .route("/logs", get(logs::list::<J>))
        .route("/flags", get(flags::list::<J>))
        .route("/flags/{key}", get(flags::get::<J>))
}
