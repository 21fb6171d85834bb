//! Stream supervisor
//!
//! Owns the registry of active streams and the lifecycle discipline around
//! them: one producer task per stream, cooperative cancellation, and a
//! bounded drain on shutdown.
//!
//! Lock discipline: the registry `RwLock` is held only for the instant of a
//! lookup, insert or remove. Frame pushes and reads go through each record's
//! own buffer mutex, so unrelated streams never serialize behind registry
//! churn. The duplicate-start race is closed by doing the uniqueness check
//! and the insert under one write-lock acquisition.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

use crate::buffer::FrameBuffer;
use crate::source::{FrameSource, StreamConfig};

use super::config::SupervisorConfig;
use super::error::SupervisorError;
use super::record::StreamRecord;

/// Result of stopping a stream
#[derive(Debug, Clone)]
pub struct StopSummary {
    /// Frames buffered at the moment of the stop
    pub frames_captured: usize,
    /// How long the stream ran
    pub uptime: Duration,
}

/// Lifecycle manager for all active streams
///
/// Thread-safe via `RwLock`; read-heavy callers (status, listing) take the
/// read lock concurrently.
pub struct StreamSupervisor {
    /// Map of camera id to stream record
    streams: RwLock<HashMap<String, Arc<StreamRecord>>>,

    /// Producer bound to every stream started through this supervisor
    source: Arc<dyn FrameSource>,

    /// Configuration
    config: SupervisorConfig,
}

impl StreamSupervisor {
    /// Create a supervisor with default configuration
    pub fn new(source: Arc<dyn FrameSource>) -> Self {
        Self::with_config(source, SupervisorConfig::default())
    }

    /// Create a supervisor with custom configuration
    pub fn with_config(source: Arc<dyn FrameSource>, config: SupervisorConfig) -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            source,
            config,
        }
    }

    /// Get the supervisor configuration
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Start a stream for a camera
    ///
    /// Creates a buffer sized `buffer_duration * fps`, registers the record
    /// in the starting state and spawns the producer task. Returns without
    /// waiting for the first frame; the producer flips the record to active
    /// (or error) asynchronously.
    pub async fn start(
        &self,
        camera_id: &str,
        source_descriptor: &str,
        fps: u32,
    ) -> Result<Arc<StreamRecord>, SupervisorError> {
        if fps == 0 {
            return Err(SupervisorError::InvalidConfig(
                "fps must be greater than zero".to_string(),
            ));
        }

        let config = StreamConfig::new(camera_id, source_descriptor, fps);
        let buffer = FrameBuffer::new(self.config.buffer_duration, fps);
        let record = Arc::new(StreamRecord::new(config, buffer));

        {
            let mut streams = self.streams.write().await;
            if streams.contains_key(camera_id) {
                return Err(SupervisorError::AlreadyActive(camera_id.to_string()));
            }
            streams.insert(camera_id.to_string(), Arc::clone(&record));
        }

        let handle = tokio::spawn(produce_loop(Arc::clone(&record), Arc::clone(&self.source)));
        record.set_task(handle);

        tracing::info!(
            camera_id = %camera_id,
            source = %source_descriptor,
            fps = fps,
            capacity = record.capacity(),
            kind = self.source.kind(),
            "Stream started"
        );

        Ok(record)
    }

    /// Stop a stream and remove it from the registry
    ///
    /// Cancels the producer and clears the buffer, but does not wait for the
    /// producer task to exit. No frame can land after this returns: the
    /// producer re-checks the cancellation token under the buffer lock
    /// before every push.
    pub async fn stop(&self, camera_id: &str) -> Result<StopSummary, SupervisorError> {
        let record = {
            let mut streams = self.streams.write().await;
            streams
                .remove(camera_id)
                .ok_or_else(|| SupervisorError::NotFound(camera_id.to_string()))?
        };

        record.cancel();

        let frames_captured = {
            let mut buffer = record.buffer().lock().await;
            let count = buffer.len();
            buffer.clear();
            count
        };

        let uptime = record.uptime();

        tracing::info!(
            camera_id = %camera_id,
            frames_captured = frames_captured,
            uptime_secs = uptime.as_secs(),
            "Stream stopped"
        );

        Ok(StopSummary {
            frames_captured,
            uptime,
        })
    }

    /// Get the record for a camera, if registered
    pub async fn get(&self, camera_id: &str) -> Option<Arc<StreamRecord>> {
        self.streams.read().await.get(camera_id).cloned()
    }

    /// Get all registered records
    pub async fn list(&self) -> Vec<Arc<StreamRecord>> {
        self.streams.read().await.values().cloned().collect()
    }

    /// Get the number of registered streams
    pub async fn stream_count(&self) -> usize {
        self.streams.read().await.len()
    }

    /// Drain every stream: cancel all producers, then wait for their tasks
    ///
    /// Waits at most `drain_timeout` overall; tasks still running after the
    /// deadline are detached, never aborted. Returns the number of streams
    /// drained.
    pub async fn shutdown(&self) -> usize {
        let drained: Vec<(String, Arc<StreamRecord>)> =
            self.streams.write().await.drain().collect();

        for (_, record) in &drained {
            record.cancel();
        }

        let deadline = tokio::time::Instant::now() + self.config.drain_timeout;
        for (camera_id, record) in &drained {
            let Some(handle) = record.take_task() else {
                continue;
            };
            if tokio::time::timeout_at(deadline, handle).await.is_err() {
                tracing::warn!(
                    camera_id = %camera_id,
                    "Producer still running at drain deadline, detaching"
                );
            }
        }

        tracing::info!(streams = drained.len(), "Supervisor drained");
        drained.len()
    }
}

/// Producer loop, one task per stream
///
/// Ticks at the stream's frame interval, producing one frame per tick until
/// cancellation or a fault. Cancellation is observed both at the tick and,
/// under the buffer lock, immediately before each push, so a stopped
/// stream's buffer stays frozen.
async fn produce_loop(record: Arc<StreamRecord>, source: Arc<dyn FrameSource>) {
    let config = record.config().clone();
    let interval = Duration::from_secs(1) / config.fps;

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    record.mark_active().await;
    tracing::debug!(
        camera_id = %config.camera_id,
        interval_ms = interval.as_millis() as u64,
        "Producer running"
    );

    let mut frame_number: u64 = 0;
    loop {
        tokio::select! {
            _ = record.cancel_token().cancelled() => break,
            _ = ticker.tick() => {}
        }

        match source.produce_frame(&config, frame_number).await {
            Ok(produced) => {
                let mut buffer = record.buffer().lock().await;
                if record.is_cancelled() {
                    break;
                }
                let frame = buffer.push(produced.payload, produced.metadata);
                tracing::trace!(
                    camera_id = %config.camera_id,
                    sequence = frame.sequence,
                    buffered = buffer.len(),
                    "Frame buffered"
                );
                frame_number += 1;
            }
            Err(e) => {
                tracing::warn!(
                    camera_id = %config.camera_id,
                    frame_number = frame_number,
                    error = %e,
                    "Producer fault, stream entering error state"
                );
                record.mark_error(e.to_string()).await;
                break;
            }
        }
    }

    tracing::debug!(
        camera_id = %config.camera_id,
        frames_produced = frame_number,
        "Producer exited"
    );
}
