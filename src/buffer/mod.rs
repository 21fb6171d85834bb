//! Bounded frame buffering
//!
//! One `FrameBuffer` per stream holds the most recent window of frames
//! (`duration * fps`, default 60 seconds). Old frames are evicted FIFO as
//! new ones arrive, so memory per stream is bounded regardless of how long
//! the stream runs.

pub mod frame;
pub mod window;

pub use frame::Frame;
pub use window::FrameBuffer;
