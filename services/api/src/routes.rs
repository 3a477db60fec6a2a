use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use funding_match::matching::{match_router, MatchService, SourceRepository};
use serde_json::json;
use std::sync::Arc;

/// Domain routes from the library plus the service endpoints every
/// deployment expects.
pub(crate) fn with_match_routes<R>(
    service: Arc<MatchService<R>>,
    repository: Arc<R>,
) -> axum::Router
where
    R: SourceRepository + 'static,
{
    match_router(service, repository)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{default_tuning, seed_catalog, InMemorySourceRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusHandle;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::OnceLock;
    use tower::ServiceExt;

    fn seeded_router() -> axum::Router {
        let repository = Arc::new(InMemorySourceRepository::with_sources(seed_catalog()));
        let service = Arc::new(MatchService::new(repository.clone(), default_tuning()));
        with_match_routes(service, repository)
    }

    // The Prometheus recorder is process-global and may only be installed
    // once; every test state shares one handle.
    fn metrics_handle() -> Arc<PrometheusHandle> {
        static HANDLE: OnceLock<Arc<PrometheusHandle>> = OnceLock::new();
        HANDLE
            .get_or_init(|| {
                let (_, handle) = axum_prometheus::PrometheusMetricLayer::pair();
                Arc::new(handle)
            })
            .clone()
    }

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: metrics_handle(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn match_endpoint_ranks_the_seed_catalog() {
        let payload = json!({
            "identity": ["Woman"],
            "state": "WV",
            "amount": "small",
            "stage": "launched",
        });

        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/match")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], json!(true));
        assert!(body["count"].as_u64().unwrap_or(0) >= 3);

        let names: Vec<&str> = body["matches"]
            .as_array()
            .expect("matches array")
            .iter()
            .filter_map(|m| m["source"]["name"].as_str())
            .collect();
        assert!(names.contains(&"Amber Grant for Women"));
        assert!(!names.contains(&"Veteran Entrepreneurs Fund"));
    }

    #[tokio::test]
    async fn sources_endpoint_lists_the_seed_catalog() {
        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sources")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(8));
    }
}
