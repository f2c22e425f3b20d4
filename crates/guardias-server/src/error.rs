use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guardias_core::GuardiasError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<GuardiasError>() {
            match e {
                GuardiasError::InvalidDateFormat(_)
                | GuardiasError::DateOutOfRange(_)
                | GuardiasError::InvalidWeekCount(_)
                | GuardiasError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
                GuardiasError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                GuardiasError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
