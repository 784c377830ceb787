// HTTP request handlers
use crate::application::query_renderer::ChartError;
use crate::domain::chart::{ChartConfig, ChartRequest};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

async fn respond<T: Serialize>(data: &T, headers: &HeaderMap) -> Response {
    match json_response(data, StatusCode::OK, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart for the default configuration
pub async fn default_chart_data(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let config = ChartConfig::default();
    tracing::info!("Serving default chart configuration: {:?}", config);

    let data = state.chart_service.chart_data(&config).await?;
    Ok(respond(&data, &headers).await)
}

/// Chart for a caller-supplied configuration
pub async fn chart_data(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    tracing::info!("Chart configuration: {:?}", request);

    let config = request.validate().map_err(ChartError::from)?;
    let data = state.chart_service.chart_data(&config).await?;
    Ok(respond(&data, &headers).await)
}

/// Selectable columns, chart types, operators and aggregation methods
pub async fn chart_options(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    tracing::info!("Fetching chart options");
    let options = state.options_service.chart_options().await;
    respond(&options, &headers).await
}
