//! Request and response bodies
//!
//! Request fields are `Option` so that missing required fields surface as a
//! 400 with an `{"error": ...}` body from the handler instead of a
//! deserialization rejection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `POST /streams` body
#[derive(Debug, Deserialize)]
pub struct StartStreamRequest {
    pub camera_id: Option<String>,
    pub source_descriptor: Option<String>,
    pub fps: Option<u32>,
}

/// `GET`/`DELETE /streams` query string
#[derive(Debug, Default, Deserialize)]
pub struct StreamQueryParams {
    pub camera_id: Option<String>,
    pub action: Option<String>,
}

/// 201 body for a started stream
#[derive(Debug, Serialize)]
pub struct StartStreamResponse {
    pub message: &'static str,
    pub camera_id: String,
    pub source_descriptor: String,
    pub fps: u32,
    pub buffer_duration_seconds: u64,
    pub buffer_capacity_frames: usize,
}

/// 200 body for a stopped stream
#[derive(Debug, Serialize)]
pub struct StopStreamResponse {
    pub message: &'static str,
    pub camera_id: String,
    pub frames_captured: usize,
    pub uptime_seconds: u64,
}

/// 200 body for `action=stream`
///
/// `frame_data` is the payload base64-encoded; internally frames stay raw
/// bytes, this boundary is the only place that encodes.
#[derive(Debug, Serialize)]
pub struct FrameResponse {
    pub camera_id: String,
    /// Capture time as fractional seconds since the Unix epoch
    pub timestamp: f64,
    pub frame_data: String,
    pub metadata: HashMap<String, String>,
    pub format: &'static str,
}

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub active_streams: usize,
}
