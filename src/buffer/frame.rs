//! Captured frame type
//!
//! Frames are immutable once created. The payload is `bytes::Bytes`, so
//! handing a frame to a caller only bumps a reference count instead of
//! copying the pixel data.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// One captured unit of stream data
///
/// Designed to be cheap to clone: the metadata map is small and the payload
/// is reference-counted.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position in the stream, strictly increasing per buffer
    pub sequence: u64,
    /// Wall-clock capture time
    pub captured_at: DateTime<Utc>,
    /// Raw frame data (zero-copy via reference counting)
    pub payload: Bytes,
    /// Producer-supplied metadata (frame number, source, format, ...)
    pub metadata: HashMap<String, String>,
}

impl Frame {
    /// Create a frame captured now
    pub fn new(sequence: u64, payload: Bytes, metadata: HashMap<String, String>) -> Self {
        Self {
            sequence,
            captured_at: Utc::now(),
            payload,
            metadata,
        }
    }

    /// Capture timestamp as fractional seconds since the Unix epoch
    pub fn epoch_seconds(&self) -> f64 {
        self.captured_at.timestamp_micros() as f64 / 1_000_000.0
    }

    /// Payload size in bytes
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
