//! Read-only projections over supervisor state
//!
//! The query service derives response-shaped views (status, latest frame,
//! full directory) from the registry without mutating anything. Derived
//! fields like uptime and fill ratio are computed at read time.

use std::sync::Arc;

use serde::Serialize;

use crate::buffer::Frame;
use crate::supervisor::{StreamRecord, StreamSupervisor, SupervisorError};

/// Status projection for one stream
#[derive(Debug, Clone, Serialize)]
pub struct StreamStatus {
    pub camera_id: String,
    pub state: &'static str,
    pub source_descriptor: String,
    pub fps: u32,
    pub buffered_frames: usize,
    pub buffer_capacity: usize,
    pub fill_ratio: f32,
    pub buffered_seconds: f32,
    pub uptime_seconds: u64,
    pub error: Option<String>,
}

/// Latest frame of a stream, still raw bytes at this layer
#[derive(Debug, Clone)]
pub struct LatestFrame {
    pub camera_id: String,
    pub frame: Frame,
}

/// Aggregate projection over every registry entry
#[derive(Debug, Clone, Serialize)]
pub struct StreamDirectory {
    pub total_streams: usize,
    pub streams: Vec<StreamStatus>,
}

/// Read-only view over the supervisor's registry
#[derive(Clone)]
pub struct StreamQueryService {
    supervisor: Arc<StreamSupervisor>,
}

impl StreamQueryService {
    pub fn new(supervisor: Arc<StreamSupervisor>) -> Self {
        Self { supervisor }
    }

    /// Status of one stream
    pub async fn status(&self, camera_id: &str) -> Result<StreamStatus, SupervisorError> {
        let record = self
            .supervisor
            .get(camera_id)
            .await
            .ok_or_else(|| SupervisorError::NotFound(camera_id.to_string()))?;

        Ok(Self::project(&record).await)
    }

    /// Most recent frame of one stream
    ///
    /// `Ok(None)` means the stream exists but has no frames yet, which is a
    /// different condition than an unknown camera id.
    pub async fn latest_frame(
        &self,
        camera_id: &str,
    ) -> Result<Option<LatestFrame>, SupervisorError> {
        let record = self
            .supervisor
            .get(camera_id)
            .await
            .ok_or_else(|| SupervisorError::NotFound(camera_id.to_string()))?;

        Ok(record.latest_frame().await.map(|frame| LatestFrame {
            camera_id: camera_id.to_string(),
            frame,
        }))
    }

    /// Directory of every registered stream
    pub async fn list_all(&self) -> StreamDirectory {
        let records = self.supervisor.list().await;
        let mut streams = Vec::with_capacity(records.len());
        for record in &records {
            streams.push(Self::project(record).await);
        }

        StreamDirectory {
            total_streams: streams.len(),
            streams,
        }
    }

    async fn project(record: &Arc<StreamRecord>) -> StreamStatus {
        let lifecycle = record.lifecycle().await;
        let buffered_frames = record.buffered_frames().await;
        let config = record.config();

        StreamStatus {
            camera_id: config.camera_id.clone(),
            state: lifecycle.state.as_str(),
            source_descriptor: config.source.clone(),
            fps: config.fps,
            buffered_frames,
            buffer_capacity: record.capacity(),
            fill_ratio: buffered_frames as f32 / record.capacity() as f32,
            buffered_seconds: buffered_frames as f32 / config.fps as f32,
            uptime_seconds: record.uptime().as_secs(),
            error: lifecycle.last_error,
        }
    }
}
