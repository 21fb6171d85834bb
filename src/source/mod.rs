//! Frame producer abstraction
//!
//! A `FrameSource` generates one frame at a time for a stream. The
//! supervisor drives it at the stream's target rate and is agnostic to the
//! variant bound: the shipped sources synthesize frames (a moving test
//! pattern and a plain-text placeholder), and embedders can plug in a real
//! protocol client by implementing the trait.

pub mod pattern;
pub mod placeholder;

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use pattern::TestPatternSource;
pub use placeholder::TextPlaceholderSource;

/// Immutable per-stream configuration shared with the producer
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Unique camera identifier (case-sensitive)
    pub camera_id: String,
    /// Opaque source descriptor, e.g. an RTSP URL
    pub source: String,
    /// Target frame rate
    pub fps: u32,
}

impl StreamConfig {
    pub fn new(camera_id: impl Into<String>, source: impl Into<String>, fps: u32) -> Self {
        Self {
            camera_id: camera_id.into(),
            source: source.into(),
            fps,
        }
    }
}

/// One produced frame: payload plus producer metadata
///
/// The shipped sources emit `frame_number`, `camera_id`, `fps`, `source`
/// and `format` keys.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    pub payload: Bytes,
    pub metadata: HashMap<String, String>,
}

/// Error returned by `produce_frame`
///
/// A fault terminates the producer loop; the stream stays registered in the
/// error state until explicitly stopped.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Frame generation failed
    #[error("frame capture failed: {0}")]
    Capture(String),
    /// The underlying source is gone or unreachable
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Producer of frames for one stream
///
/// Implementations must be cheap to call repeatedly at the stream's frame
/// rate and are shared across streams, so any per-stream state has to live
/// in the arguments, not in `self`.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Produce the frame with the given number for the given stream
    async fn produce_frame(
        &self,
        config: &StreamConfig,
        frame_number: u64,
    ) -> Result<SourceFrame, SourceError>;

    /// Short variant name for logs
    fn kind(&self) -> &'static str;
}

/// Standard metadata map emitted by the shipped sources
fn base_metadata(config: &StreamConfig, frame_number: u64, format: &str) -> HashMap<String, String> {
    let mut metadata = HashMap::with_capacity(5);
    metadata.insert("frame_number".to_string(), frame_number.to_string());
    metadata.insert("camera_id".to_string(), config.camera_id.clone());
    metadata.insert("fps".to_string(), config.fps.to_string());
    metadata.insert("source".to_string(), config.source.clone());
    metadata.insert("format".to_string(), format.to_string());
    metadata
}
