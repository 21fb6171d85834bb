//! Route handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::error::ApiError;
use super::models::{
    FrameResponse, HealthResponse, StartStreamRequest, StartStreamResponse, StopStreamResponse,
    StreamQueryParams,
};
use super::ApiState;

/// `POST /streams`: start a stream
pub async fn start_stream(
    State(state): State<ApiState>,
    Json(body): Json<StartStreamRequest>,
) -> Result<Response, ApiError> {
    let (camera_id, source_descriptor) = match (
        body.camera_id.as_deref().filter(|s| !s.is_empty()),
        body.source_descriptor.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(camera_id), Some(source)) => (camera_id, source),
        _ => {
            return Err(ApiError::validation(
                "camera_id and source_descriptor required",
            ))
        }
    };

    let fps = body.fps.unwrap_or(state.supervisor.config().default_fps);
    let record = state.supervisor.start(camera_id, source_descriptor, fps).await?;

    let response = StartStreamResponse {
        message: "Stream started successfully",
        camera_id: camera_id.to_string(),
        source_descriptor: source_descriptor.to_string(),
        fps,
        buffer_duration_seconds: state.supervisor.config().buffer_duration.as_secs(),
        buffer_capacity_frames: record.capacity(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// `GET /streams`: dispatch on the `action` query parameter
///
/// `list` needs no camera id; `stream` returns the latest frame; anything
/// else (including no action) is a status query.
pub async fn get_streams(
    State(state): State<ApiState>,
    Query(params): Query<StreamQueryParams>,
) -> Result<Response, ApiError> {
    if params.action.as_deref() == Some("list") {
        return Ok(Json(state.query.list_all().await).into_response());
    }

    let camera_id = require_camera_id(params.camera_id.as_deref())?;

    if params.action.as_deref() == Some("stream") {
        return match state.query.latest_frame(camera_id).await? {
            Some(latest) => {
                let frame = latest.frame;
                let response = FrameResponse {
                    camera_id: latest.camera_id,
                    timestamp: frame.epoch_seconds(),
                    frame_data: STANDARD.encode(&frame.payload),
                    metadata: frame.metadata,
                    format: "base64",
                };
                Ok(Json(response).into_response())
            }
            None => Ok(StatusCode::NO_CONTENT.into_response()),
        };
    }

    let status = state.query.status(camera_id).await?;
    Ok(Json(status).into_response())
}

/// `DELETE /streams?camera_id=X`: stop a stream
pub async fn stop_stream(
    State(state): State<ApiState>,
    Query(params): Query<StreamQueryParams>,
) -> Result<Json<StopStreamResponse>, ApiError> {
    let camera_id = require_camera_id(params.camera_id.as_deref())?;

    let summary = state.supervisor.stop(camera_id).await?;

    Ok(Json(StopStreamResponse {
        message: "Stream stopped successfully",
        camera_id: camera_id.to_string(),
        frames_captured: summary.frames_captured,
        uptime_seconds: summary.uptime.as_secs(),
    }))
}

/// `OPTIONS /streams`: CORS preflight pass-through
///
/// The permissive headers come from the CORS layer; this handler only keeps
/// the method router from answering 405.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `GET /health`
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        active_streams: state.supervisor.stream_count().await,
    })
}

fn require_camera_id(camera_id: Option<&str>) -> Result<&str, ApiError> {
    camera_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("camera_id parameter required"))
}
