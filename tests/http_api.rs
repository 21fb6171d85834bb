//! In-process tests of the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;

use camring::server::{HttpServer, ServerConfig};
use camring::source::{FrameSource, SourceError, SourceFrame, StreamConfig, TextPlaceholderSource};
use camring::supervisor::StreamSupervisor;

/// Source that never yields a frame, so buffers stay empty
struct StalledSource;

#[async_trait]
impl FrameSource for StalledSource {
    async fn produce_frame(
        &self,
        _config: &StreamConfig,
        _frame_number: u64,
    ) -> Result<SourceFrame, SourceError> {
        std::future::pending().await
    }

    fn kind(&self) -> &'static str {
        "stalled"
    }
}

fn app_with(source: Arc<dyn FrameSource>) -> Router {
    let supervisor = Arc::new(StreamSupervisor::new(source));
    HttpServer::new(ServerConfig::default(), supervisor).router()
}

fn app() -> Router {
    app_with(Arc::new(TextPlaceholderSource::new()))
}

fn post_streams(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/streams")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_start_stream_created() {
    let app = app();

    let response = app
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x",
            "fps": 10
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["camera_id"], "cam1");
    assert_eq!(body["source_descriptor"], "rtsp://x");
    assert_eq!(body["fps"], 10);
    assert_eq!(body["buffer_duration_seconds"], 60);
    assert_eq!(body["buffer_capacity_frames"], 600);
    assert_eq!(body["message"], "Stream started successfully");
}

#[tokio::test]
async fn test_start_defaults_fps() {
    let app = app();

    let response = app
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["fps"], 25);
    assert_eq!(body["buffer_capacity_frames"], 1500);
}

#[tokio::test]
async fn test_start_missing_fields() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_streams(json!({ "camera_id": "cam1" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "camera_id and source_descriptor required");

    let response = app
        .oneshot(post_streams(json!({ "source_descriptor": "rtsp://x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_start_conflict() {
    let app = app();

    let body = json!({ "camera_id": "cam1", "source_descriptor": "rtsp://x" });
    let response = app.clone().oneshot(post_streams(body.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(post_streams(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already active"));
}

#[tokio::test]
async fn test_status_unknown_camera() {
    let app = app();

    let response = app.oneshot(get("/streams?camera_id=nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_status_missing_camera_id() {
    let app = app();

    let response = app.oneshot(get("/streams")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "camera_id parameter required");
}

#[tokio::test]
async fn test_status_projection() {
    let app = app();

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x",
            "fps": 10
        })))
        .await
        .unwrap();

    let response = app.oneshot(get("/streams?camera_id=cam1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["camera_id"], "cam1");
    assert_eq!(body["fps"], 10);
    assert_eq!(body["buffer_capacity"], 600);
    assert!(body["state"] == "starting" || body["state"] == "active");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_unknown_action_falls_through_to_status() {
    let app = app();

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x"
        })))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/streams?camera_id=cam1&action=bogus"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["camera_id"], "cam1");
}

#[tokio::test]
async fn test_stream_action_empty_buffer_is_204() {
    let app = app_with(Arc::new(StalledSource));

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x"
        })))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/streams?camera_id=cam1&action=stream"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_stream_action_unknown_camera_is_404() {
    let app = app();

    let response = app
        .oneshot(get("/streams?camera_id=nope&action=stream"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stream_action_returns_base64_frame() {
    let app = app();

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x",
            "fps": 20
        })))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let response = app
        .oneshot(get("/streams?camera_id=cam1&action=stream"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["camera_id"], "cam1");
    assert_eq!(body["format"], "base64");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);
    assert!(body["metadata"]["frame_number"].is_string());

    let decoded = STANDARD
        .decode(body["frame_data"].as_str().unwrap())
        .unwrap();
    assert!(decoded.starts_with(b"FRAME_"));
}

#[tokio::test]
async fn test_list_streams() {
    let app = app();

    for id in ["cam1", "cam2"] {
        app.clone()
            .oneshot(post_streams(json!({
                "camera_id": id,
                "source_descriptor": "rtsp://x"
            })))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/streams?action=list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_streams"], 2);
    assert_eq!(body["streams"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_flow() {
    let app = app();

    let response = app.clone().oneshot(delete("/streams")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(delete("/streams?camera_id=nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x",
            "fps": 10
        })))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let response = app
        .clone()
        .oneshot(delete("/streams?camera_id=cam1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["camera_id"], "cam1");
    assert_eq!(body["message"], "Stream stopped successfully");
    let frames = body["frames_captured"].as_u64().unwrap();
    assert!((3..=9).contains(&frames));

    // Gone from the listing afterwards
    let response = app.oneshot(get("/streams?action=list")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total_streams"], 0);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/streams")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_preflight_gets_cors_headers() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/streams")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_health() {
    let app = app();

    app.clone()
        .oneshot(post_streams(json!({
            "camera_id": "cam1",
            "source_descriptor": "rtsp://x"
        })))
        .await
        .unwrap();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_streams"], 1);
    assert!(body["version"].is_string());
}
