use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use jot_core::errors::JotError;

/// Handler result type; any error funnels through [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Carrier for handler failures. Structured [`JotError`]s (even wrapped in
/// anyhow context) keep their status and message; anything else becomes a
/// 500 with a generic body, with the real cause logged server-side only.
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(jot) = self.0.chain().find_map(|e| e.downcast_ref::<JotError>()) {
            let status =
                StatusCode::from_u16(jot.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(error = %self.0, "request failed");
            }
            return (status, Json(jot.to_json())).into_response();
        }

        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}

pub(crate) fn map_json_rejection(_rejection: JsonRejection) -> ApiError {
    JotError::bad_request("Failed to parse the request body as JSON")
        .into_anyhow()
        .into()
}
