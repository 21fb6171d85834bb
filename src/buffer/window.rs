//! Sliding-window frame buffer
//!
//! Each stream keeps only the most recent window of frames: capacity is
//! `duration * fps`, fixed at creation. When the window is full the oldest
//! frame is evicted before the new one is appended, so the buffer always
//! holds the last N frames in capture order.
//!
//! The window itself does no locking. The owning stream record wraps it in
//! its own mutex, so every buffer is synchronized independently of the
//! registry and of other streams' buffers.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;

use super::frame::Frame;

/// Fixed-capacity FIFO window of the most recent frames of one stream
#[derive(Debug)]
pub struct FrameBuffer {
    /// Maximum number of retained frames, never changes after creation
    capacity: usize,
    /// Retained frames, oldest first
    frames: VecDeque<Frame>,
    /// Sequence number for the next pushed frame; survives `clear()`
    next_sequence: u64,
}

impl FrameBuffer {
    /// Create a buffer sized to hold `duration` worth of frames at `fps`
    ///
    /// Capacity is clamped to at least one frame.
    pub fn new(duration: Duration, fps: u32) -> Self {
        Self::with_capacity(duration.as_secs() as usize * fps as usize)
    }

    /// Create a buffer with an explicit frame capacity (clamped to >= 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Append a frame, evicting the oldest one first when at capacity
    ///
    /// Assigns the next sequence number and the capture timestamp. Returns a
    /// cheap clone of the stored frame.
    pub fn push(&mut self, payload: Bytes, metadata: HashMap<String, String>) -> Frame {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }

        let frame = Frame::new(self.next_sequence, payload, metadata);
        self.next_sequence += 1;
        self.frames.push_back(frame.clone());
        frame
    }

    /// Get the most recently pushed frame
    pub fn latest(&self) -> Option<Frame> {
        self.frames.back().cloned()
    }

    /// Copy out up to `limit` most recent frames, oldest first
    ///
    /// The returned frames are independent of the buffer: later pushes and
    /// evictions do not affect them.
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<Frame> {
        let take = limit.unwrap_or(self.frames.len()).min(self.frames.len());
        self.frames
            .iter()
            .skip(self.frames.len() - take)
            .cloned()
            .collect()
    }

    /// Number of retained frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Maximum number of retained frames
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fraction of the window currently filled, in `0.0..=1.0`
    pub fn fill_ratio(&self) -> f32 {
        self.frames.len() as f32 / self.capacity as f32
    }

    /// Drop all frames without changing capacity or rewinding sequence numbers
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_n(buffer: &mut FrameBuffer, n: usize) {
        for _ in 0..n {
            buffer.push(Bytes::from_static(b"frame"), HashMap::new());
        }
    }

    #[test]
    fn test_push_and_latest() {
        let mut buffer = FrameBuffer::with_capacity(10);

        assert!(buffer.latest().is_none());
        assert!(buffer.is_empty());

        let pushed = buffer.push(Bytes::from_static(b"first"), HashMap::new());
        let latest = buffer.latest().unwrap();

        assert_eq!(latest.sequence, pushed.sequence);
        assert_eq!(latest.payload, pushed.payload);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_eviction_keeps_last_n() {
        let mut buffer = FrameBuffer::with_capacity(5);

        push_n(&mut buffer, 12);

        assert_eq!(buffer.len(), 5);
        let frames = buffer.snapshot(None);
        let sequences: Vec<u64> = frames.iter().map(|f| f.sequence).collect();
        assert_eq!(sequences, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut buffer = FrameBuffer::with_capacity(3);

        for _ in 0..20 {
            buffer.push(Bytes::from_static(b"x"), HashMap::new());
            assert!(buffer.len() <= buffer.capacity());
        }
    }

    #[test]
    fn test_sequence_strictly_increasing() {
        let mut buffer = FrameBuffer::with_capacity(4);

        push_n(&mut buffer, 10);

        let frames = buffer.snapshot(None);
        for pair in frames.windows(2) {
            assert!(pair[1].sequence > pair[0].sequence);
        }
    }

    #[test]
    fn test_snapshot_limit() {
        let mut buffer = FrameBuffer::with_capacity(10);

        push_n(&mut buffer, 6);

        let recent = buffer.snapshot(Some(2));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].sequence, 4);
        assert_eq!(recent[1].sequence, 5);

        // Limit larger than contents returns everything
        assert_eq!(buffer.snapshot(Some(100)).len(), 6);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut buffer = FrameBuffer::with_capacity(3);

        push_n(&mut buffer, 3);
        let snapshot = buffer.snapshot(None);

        // Push enough to evict everything the snapshot saw
        push_n(&mut buffer, 3);

        let sequences: Vec<u64> = snapshot.iter().map(|f| f.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear_keeps_capacity_and_sequence() {
        let mut buffer = FrameBuffer::with_capacity(5);

        push_n(&mut buffer, 3);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 5);

        // Sequence numbering continues past the cleared frames
        let frame = buffer.push(Bytes::from_static(b"x"), HashMap::new());
        assert_eq!(frame.sequence, 3);
    }

    #[test]
    fn test_fill_ratio() {
        let mut buffer = FrameBuffer::with_capacity(4);

        assert_eq!(buffer.fill_ratio(), 0.0);

        push_n(&mut buffer, 2);
        assert!((buffer.fill_ratio() - 0.5).abs() < f32::EPSILON);

        push_n(&mut buffer, 10);
        assert_eq!(buffer.fill_ratio(), 1.0);
    }

    #[test]
    fn test_duration_capacity() {
        let buffer = FrameBuffer::new(Duration::from_secs(60), 25);
        assert_eq!(buffer.capacity(), 1500);
    }

    #[test]
    fn test_capacity_clamped_to_one() {
        let buffer = FrameBuffer::with_capacity(0);
        assert_eq!(buffer.capacity(), 1);

        let buffer = FrameBuffer::new(Duration::from_millis(100), 1);
        assert_eq!(buffer.capacity(), 1);
    }

    #[test]
    fn test_metadata_preserved() {
        let mut buffer = FrameBuffer::with_capacity(2);

        let mut metadata = HashMap::new();
        metadata.insert("frame_number".to_string(), "0".to_string());
        metadata.insert("format".to_string(), "ppm".to_string());

        buffer.push(Bytes::from_static(b"data"), metadata);

        let latest = buffer.latest().unwrap();
        assert_eq!(latest.metadata.get("format").unwrap(), "ppm");
        assert_eq!(latest.metadata.get("frame_number").unwrap(), "0");
    }
}
