// Error mapping at the request-handling boundary
use crate::application::query_renderer::ChartError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

const GENERIC_MESSAGE: &str = "Failed to process request";

/// Every failure the API reports: 400 with `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected chart request body: {}", rejection.body_text());
        Self::bad_request(GENERIC_MESSAGE)
    }
}

/// Validation problems are described to the caller; store failures are
/// logged and reported generically.
impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Compile(e) => {
                tracing::warn!("Invalid chart configuration: {}", e);
                Self::bad_request(format!("Invalid chart configuration: {}", e))
            }
            ChartError::Template(name) => {
                tracing::error!("Missing chart template: {}", name);
                Self::bad_request(GENERIC_MESSAGE)
            }
            ChartError::Query(e) => {
                tracing::error!("Error processing chart configuration: {:#}", e);
                Self::bad_request(GENERIC_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}
