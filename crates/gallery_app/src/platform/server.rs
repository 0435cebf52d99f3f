//! HTTP boundary: `GET /api/extract-images?url=...` plus a health probe.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use gallery_engine::{ExtractionFailure, ExtractionService, FailureCategory, FetchSettings};
use gallery_logging::{gallery_info, gallery_warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn status_for(failure: &ExtractionFailure) -> StatusCode {
    match failure.category() {
        FailureCategory::Input => StatusCode::BAD_REQUEST,
        FailureCategory::Fetch => StatusCode::BAD_GATEWAY,
        FailureCategory::Extraction => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure_response(failure: ExtractionFailure) -> Response {
    let body = ErrorBody {
        error: failure.summary().to_string(),
        details: failure.detail(),
    };
    (status_for(&failure), Json(body)).into_response()
}

async fn extract_images(
    State(service): State<Arc<ExtractionService>>,
    Query(params): Query<ExtractParams>,
) -> Response {
    match service.extract_images(params.url.as_deref()).await {
        Ok(images) => Json(images).into_response(),
        Err(failure) => {
            gallery_warn!("extract-images for {:?} failed: {}", params.url, failure);
            failure_response(failure)
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(service: Arc<ExtractionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/extract-images", get(extract_images))
        .route("/health", get(health))
        .layer(cors)
        .with_state(service)
}

pub async fn serve(bind: SocketAddr, settings: FetchSettings) -> Result<()> {
    let app = router(Arc::new(ExtractionService::new(settings)));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {bind}"))?;
    gallery_info!("Listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            gallery_info!("Shutting down");
        })
        .await
        .context("Server error")?;

    Ok(())
}

/// Blocking entry point used by `main`.
pub fn run(bind: SocketAddr, settings: FetchSettings) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(serve(bind, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app() -> Router {
        router(Arc::new(ExtractionService::new(FetchSettings::default())))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_url_is_bad_request() {
        let (status, body) = get_json(app(), "/api/extract-images").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing URL parameter");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn returns_resolved_image_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gallery"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<img src="/a.jpg"><img data-src="b.png">"#,
                "text/html; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let uri = format!("/api/extract-images?url={}/gallery", server.uri());
        let (status, body) = get_json(app(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([
                format!("{}/a.jpg", server.uri()),
                format!("{}/b.png", server.uri()),
            ])
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let uri = format!("/api/extract-images?url={}/missing", server.uri());
        let (status, body) = get_json(app(), &uri).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to fetch page");
        assert!(body["details"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn responses_carry_cors_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
