// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_data, chart_options, default_chart_data, health_check};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart-data", get(default_chart_data).post(chart_data))
        .route("/chart-options", get(chart_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_repository::{ChartRepository, Statement};
    use crate::application::options_service::OptionsService;
    use crate::application::query_renderer::ChartService;
    use crate::domain::catalog::Column;
    use crate::domain::chart::{ChartData, ChartRow};
    use crate::infrastructure::mock_repository::MockRepository;
    use crate::infrastructure::templates::SqlTemplateStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    struct BrokenStore;

    #[async_trait]
    impl ChartRepository for BrokenStore {
        async fn query_rows(&self, _statement: &Statement) -> anyhow::Result<Vec<ChartRow>> {
            anyhow::bail!("syntax error at or near \"FROM\"")
        }

        async fn distinct_values(&self, _column: Column) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("connection refused")
        }
    }

    fn router_with(repository: Arc<dyn ChartRepository>) -> Router {
        let state = Arc::new(AppState {
            chart_service: ChartService::new(
                repository.clone(),
                Arc::new(SqlTemplateStore::builtin()),
                "companies".to_string(),
            ),
            options_service: OptionsService::new(repository),
        });
        build_router(state)
    }

    fn mock_router() -> Router {
        router_with(Arc::new(MockRepository::new()))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chart-data")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = mock_router()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_chart_data_uses_default_configuration() {
        let response = mock_router()
            .oneshot(Request::get("/chart-data").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let data: ChartData = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(data.labels, vec!["2001", "2002", "2003", "2004", "2005"]);
        assert_eq!(data.datasets.len(), 3);
        for dataset in &data.datasets {
            assert_eq!(dataset.data.len(), data.labels.len());
            assert!(dataset.border_color.is_some());
        }
    }

    #[tokio::test]
    async fn test_post_pie_chart() {
        let response = mock_router()
            .oneshot(post_json(
                r#"{"filters":[{"column":"industry","values":["Biotech"]}],"chartType":"pie","aggregationFn":"avg"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["datasets"].as_array().unwrap().len(), 1);
        assert_eq!(json["datasets"][0]["label"], "AVG(revenue)");
        assert!(json["datasets"][0]["backgroundColor"].is_array());
    }

    #[tokio::test]
    async fn test_unrecognized_chart_type_is_not_an_error() {
        let response = mock_router()
            .oneshot(post_json(r#"{"chartType":"scatter"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["labels"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = mock_router()
            .oneshot(post_json("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Failed to process request"})
        );
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_bad_request() {
        let response = mock_router()
            .oneshot(post_json(r#"{"groupByField":"industry; DROP TABLE companies"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid chart configuration"));
    }

    #[tokio::test]
    async fn test_query_failure_returns_single_error() {
        let response = router_with(Arc::new(BrokenStore))
            .oneshot(post_json("{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "Failed to process request"}));
        assert!(json.get("labels").is_none());
    }

    #[tokio::test]
    async fn test_chart_options_survive_store_failure() {
        let response = router_with(Arc::new(BrokenStore))
            .oneshot(Request::get("/chart-options").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["columns"].as_array().unwrap().len(), Column::ALL.len());
        assert_eq!(json["chartTypes"][2]["value"], "pie");
        assert!(!json["timeRanges"].as_array().unwrap().is_empty());
        assert_eq!(json["timeRanges"][0]["value"], "monthly");
    }

    #[tokio::test]
    async fn test_chart_options_list_mock_values() {
        let response = mock_router()
            .oneshot(Request::get("/chart-options").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        let industry = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["value"] == "industry")
            .unwrap()
            .clone();
        assert_eq!(
            industry["values"],
            serde_json::json!(["Biotech", "Cleantech", "Healthcare"])
        );
    }

    #[tokio::test]
    async fn test_mock_pie_groups_by_requested_column() {
        let response = mock_router()
            .oneshot(
                post_json(r#"{"chartType":"pie","groupByField":"region","timeRange":"yearly"}"#),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["labels"],
            serde_json::json!(["Midwest", "Northeast", "South", "West"])
        );
    }
}
