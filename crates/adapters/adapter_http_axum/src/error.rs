//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use heathub_domain::error::HeatHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and client-facing message for an error.
///
/// Internal failures are traced and replaced by a generic message.
pub(crate) fn classify(err: &HeatHubError) -> (StatusCode, String) {
    match err {
        HeatHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        HeatHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        HeatHubError::Storage(err) => {
            tracing::error!(error = %err, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "collaborator error");
            (StatusCode::BAD_GATEWAY, other.to_string())
        }
    }
}

/// Maps [`HeatHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(HeatHubError);

impl From<HeatHubError> for ApiError {
    fn from(err: HeatHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
