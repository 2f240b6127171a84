//! Server-side rendered HTML dashboard (no JavaScript).

pub mod home;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use heathub_app::ports::{FlagStore, LogStore};
use heathub_domain::error::HeatHubError;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<J>() -> Router<AppState<J>>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    Router::new().route("/", get(home::index::<J>))
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Renders a failed page load as a minimal HTML error page.
pub struct DashboardError(HeatHubError);

impl From<HeatHubError> for DashboardError {
    fn from(err: HeatHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = crate::error::classify(&self.0);
        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render error page");
                status.into_response()
            }
        }
    }
}
