//! Per-stream registry record
//!
//! A `StreamRecord` holds everything the supervisor tracks for one camera:
//! the immutable stream configuration, the frame buffer, the lifecycle state
//! written by the producer, and the producer's cancellation token. The
//! buffer and the lifecycle have their own locks so record access never
//! serializes behind the registry lock or behind other streams.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::buffer::{Frame, FrameBuffer};
use crate::source::StreamConfig;

/// Lifecycle state of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    /// Record registered, producer not yet running
    Starting,
    /// Producer is generating frames
    Active,
    /// Producer faulted and exited; stream stays listed until stopped
    Error,
}

impl StreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamState::Starting => "starting",
            StreamState::Active => "active",
            StreamState::Error => "error",
        }
    }
}

/// Producer-written lifecycle fields
#[derive(Debug, Clone)]
pub struct Lifecycle {
    pub state: StreamState,
    pub last_error: Option<String>,
}

/// Entry for a single stream in the registry
pub struct StreamRecord {
    config: StreamConfig,
    capacity: usize,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,

    /// Content lock: the producer pushes and readers copy under this mutex
    buffer: Mutex<FrameBuffer>,

    /// Written by the producer on transitions and faults
    lifecycle: RwLock<Lifecycle>,

    /// Cooperative stop signal for the producer task
    cancel: CancellationToken,

    /// Producer task handle, consumed by the shutdown drain
    task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl StreamRecord {
    pub(super) fn new(config: StreamConfig, buffer: FrameBuffer) -> Self {
        Self {
            config,
            capacity: buffer.capacity(),
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
            buffer: Mutex::new(buffer),
            lifecycle: RwLock::new(Lifecycle {
                state: StreamState::Starting,
                last_error: None,
            }),
            cancel: CancellationToken::new(),
            task: std::sync::Mutex::new(None),
        }
    }

    /// Stream configuration (camera id, source descriptor, fps)
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Camera identifier
    pub fn camera_id(&self) -> &str {
        &self.config.camera_id
    }

    /// Buffer capacity in frames
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Time since the stream was started
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Wall-clock start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }

    /// Current lifecycle snapshot
    pub async fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.read().await.clone()
    }

    /// Current lifecycle state
    pub async fn state(&self) -> StreamState {
        self.lifecycle.read().await.state
    }

    /// Number of frames currently buffered
    pub async fn buffered_frames(&self) -> usize {
        self.buffer.lock().await.len()
    }

    /// Most recent buffered frame, if any
    pub async fn latest_frame(&self) -> Option<Frame> {
        self.buffer.lock().await.latest()
    }

    /// Copy of up to `limit` most recent buffered frames, oldest first
    pub async fn recent_frames(&self, limit: Option<usize>) -> Vec<Frame> {
        self.buffer.lock().await.snapshot(limit)
    }

    pub(super) fn buffer(&self) -> &Mutex<FrameBuffer> {
        &self.buffer
    }

    pub(super) fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(super) fn cancel(&self) {
        self.cancel.cancel();
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Mark the producer as running
    ///
    /// A fault observed before this call wins: the error state is terminal.
    pub(super) async fn mark_active(&self) {
        let mut lifecycle = self.lifecycle.write().await;
        if lifecycle.state == StreamState::Starting {
            lifecycle.state = StreamState::Active;
        }
    }

    /// Record a producer fault; written once, first fault wins
    pub(super) async fn mark_error(&self, message: String) {
        let mut lifecycle = self.lifecycle.write().await;
        if lifecycle.last_error.is_none() {
            lifecycle.state = StreamState::Error;
            lifecycle.last_error = Some(message);
        }
    }

    pub(super) fn set_task(&self, handle: JoinHandle<()>) {
        if let Ok(mut task) = self.task.lock() {
            *task = Some(handle);
        }
    }

    pub(super) fn take_task(&self) -> Option<JoinHandle<()>> {
        self.task.lock().ok().and_then(|mut task| task.take())
    }
}
